/*!
 * Study session state.
 *
 * Everything the UI layer keeps between interactions lives in one
 * explicit struct owned by the controller: cursor positions, per-sentence
 * comprehension ratings, the daily counter, the optional shuffled study
 * order, and the generated shadowing passage. Nothing here touches disk;
 * a session lives and dies with the process.
 */

use std::collections::HashMap;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::content_parser::SentencePair;

/// Audio speed presets offered by the player (slow, normal, fast)
pub const SPEED_PRESETS: [f32; 3] = [0.7, 1.0, 1.3];

/// Subjective comprehension rating for one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comprehension {
    /// Understood without effort
    Easy,
    /// Understood with some effort
    Normal,
    /// Not really understood
    Difficult,
}

impl Comprehension {
    /// Difficulty score on the 1-3 scale used by the progress summary
    pub fn score(&self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Normal => 2,
            Self::Difficult => 3,
        }
    }

    /// Get a human-readable rating string
    pub fn display(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Difficult => "difficult",
        }
    }
}

/// Mutable state of one study session
#[derive(Debug)]
pub struct StudySession {
    /// Position in the study order
    current_index: usize,

    /// Whether the translation side of the card is showing
    pub show_translation: bool,

    /// Ratings keyed by "group_sentence"
    ratings: HashMap<String, Comprehension>,

    /// Sentences rated since the day started
    studied_today: u32,

    /// Day the counter belongs to
    today: NaiveDate,

    /// Shuffled deck order, present in random mode
    shuffled: Option<Vec<usize>>,

    /// Selected audio speed preset
    pub audio_rate: f32,

    /// Generated shadowing passage
    passage: Vec<SentencePair>,

    /// Position inside the shadowing passage
    shadowing_index: usize,
}

impl Default for StudySession {
    fn default() -> Self {
        Self::new()
    }
}

impl StudySession {
    /// Create a fresh session
    pub fn new() -> Self {
        StudySession {
            current_index: 0,
            show_translation: false,
            ratings: HashMap::new(),
            studied_today: 0,
            today: chrono::Local::now().date_naive(),
            shuffled: None,
            audio_rate: 1.0,
            passage: Vec::new(),
            shadowing_index: 0,
        }
    }

    /// Raw cursor position (not wrapped to the deck)
    pub fn position(&self) -> usize {
        self.current_index
    }

    /// Index into the deck for the current card.
    ///
    /// Wraps around the deck and routes through the shuffled order when
    /// one is active. An empty deck has no current card.
    pub fn current_deck_index(&self, deck_len: usize) -> Option<usize> {
        if deck_len == 0 {
            return None;
        }
        match &self.shuffled {
            Some(order) if order.len() == deck_len => {
                Some(order[self.current_index % order.len()])
            }
            _ => Some(self.current_index % deck_len),
        }
    }

    /// Create (or recreate) a shuffled order over the deck.
    ///
    /// A stale order from a differently-sized deck is replaced.
    pub fn shuffle(&mut self, deck_len: usize) {
        let needs_new = match &self.shuffled {
            Some(order) => order.len() != deck_len,
            None => true,
        };
        if needs_new {
            let mut order: Vec<usize> = (0..deck_len).collect();
            order.shuffle(&mut rand::rng());
            self.shuffled = Some(order);
        }
    }

    /// Drop the shuffled order and study in file order again
    pub fn clear_shuffle(&mut self) {
        self.shuffled = None;
    }

    /// Move to the next card
    pub fn advance(&mut self) {
        self.current_index += 1;
        self.show_translation = false;
    }

    /// Move to the previous card, stopping at the first
    pub fn back(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
        self.show_translation = false;
    }

    /// Jump to an absolute position
    pub fn jump_to(&mut self, index: usize) {
        self.current_index = index;
        self.show_translation = false;
    }

    /// Back to the first card, in file order
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.show_translation = false;
        self.shuffled = None;
    }

    /// Record a comprehension rating for a sentence and advance.
    ///
    /// Re-rating a sentence overwrites the earlier rating but still counts
    /// toward the daily total.
    pub fn rate(&mut self, sentence_key: impl Into<String>, rating: Comprehension) {
        self.roll_date();
        self.ratings.insert(sentence_key.into(), rating);
        self.studied_today += 1;
        self.advance();
    }

    /// Rating previously given to a sentence
    pub fn rating_for(&self, sentence_key: &str) -> Option<Comprehension> {
        self.ratings.get(sentence_key).copied()
    }

    /// Sentences rated since the day started
    pub fn studied_today(&self) -> u32 {
        self.studied_today
    }

    // @resets: Daily counter when the calendar day changed
    fn roll_date(&mut self) {
        let today = chrono::Local::now().date_naive();
        if today != self.today {
            self.today = today;
            self.studied_today = 0;
        }
    }

    /// Install a freshly generated shadowing passage
    pub fn set_passage(&mut self, pairs: Vec<SentencePair>) {
        self.passage = pairs;
        self.shadowing_index = 0;
    }

    /// Drop the shadowing passage
    pub fn clear_passage(&mut self) {
        self.passage.clear();
        self.shadowing_index = 0;
    }

    /// The full shadowing passage
    pub fn passage(&self) -> &[SentencePair] {
        &self.passage
    }

    /// Current sentence of the shadowing passage
    pub fn current_shadowing_pair(&self) -> Option<&SentencePair> {
        self.passage.get(self.shadowing_index)
    }

    /// Position inside the shadowing passage
    pub fn shadowing_position(&self) -> usize {
        self.shadowing_index
    }

    /// Step forward in the passage; false when already at the last sentence
    pub fn advance_shadowing(&mut self) -> bool {
        if self.shadowing_index + 1 < self.passage.len() {
            self.shadowing_index += 1;
            true
        } else {
            false
        }
    }

    /// Step back in the passage, stopping at the first sentence
    pub fn back_shadowing(&mut self) {
        self.shadowing_index = self.shadowing_index.saturating_sub(1);
    }

    /// Jump to a sentence of the passage, clamped to its end
    pub fn jump_shadowing(&mut self, index: usize) {
        self.shadowing_index = index.min(self.passage.len().saturating_sub(1));
    }

    /// Aggregate the ratings into a progress summary
    pub fn summary(&self) -> ProgressSummary {
        let mut summary = ProgressSummary {
            total_rated: self.ratings.len() as u32,
            studied_today: self.studied_today,
            easy: 0,
            normal: 0,
            difficult: 0,
        };
        for rating in self.ratings.values() {
            match rating {
                Comprehension::Easy => summary.easy += 1,
                Comprehension::Normal => summary.normal += 1,
                Comprehension::Difficult => summary.difficult += 1,
            }
        }
        summary
    }
}

/// Snapshot of study progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Distinct sentences rated so far
    pub total_rated: u32,
    /// Sentences rated since the day started
    pub studied_today: u32,
    /// Count of easy ratings
    pub easy: u32,
    /// Count of normal ratings
    pub normal: u32,
    /// Count of difficult ratings
    pub difficult: u32,
}

impl ProgressSummary {
    /// Average difficulty on the 1-3 scale; 0.0 with no ratings yet
    pub fn average_difficulty(&self) -> f64 {
        if self.total_rated == 0 {
            return 0.0;
        }
        let total = self.easy * Comprehension::Easy.score()
            + self.normal * Comprehension::Normal.score()
            + self.difficult * Comprehension::Difficult.score();
        f64::from(total) / f64::from(self.total_rated)
    }
}
