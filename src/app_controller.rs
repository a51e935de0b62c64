use anyhow::{Result, anyhow};
use log::{info, debug};

use crate::app_config::Config;
use crate::errors::SpeechError;
use crate::generation::{GenerationService, Genre};
use crate::highlight;
use crate::sentence_store::{SentenceStore, create_sample_data};
use crate::session::{Comprehension, ProgressSummary, StudySession};
use crate::speech::{AudioClip, SpeechService};

// @module: Application controller for study interactions

/// One sentence card prepared for display.
///
/// The html fields are fully escaped and safe to hand to a rendering
/// surface as-is; target vocabulary is already wrapped in highlight marks.
#[derive(Debug, Clone)]
pub struct StudyCard {
    /// Rating key ("group_sentence")
    pub key: String,

    /// 1-based position inside the active deck
    pub position: usize,

    /// Size of the active deck
    pub total: usize,

    /// Sentence kind from the data file
    pub kind: String,

    /// Raw English text (for speech synthesis)
    pub english: String,

    /// Raw Japanese text
    pub japanese: String,

    /// Escaped English with vocabulary highlights
    pub english_html: String,

    /// Escaped Japanese with translated-meaning highlights
    pub japanese_html: String,

    /// Target words attached to the sentence
    pub words: Vec<String>,
}

/// One shadowing sentence prepared for display
#[derive(Debug, Clone)]
pub struct ShadowingCard {
    /// 1-based position inside the passage
    pub position: usize,

    /// Passage length
    pub total: usize,

    /// Raw English text (for speech synthesis)
    pub english: String,

    /// Escaped English
    pub english_html: String,

    /// Escaped Japanese
    pub japanese_html: String,
}

/// Main application controller.
///
/// Owns the configuration, the loaded sentence store, both collaborator
/// services, and the session state. Every user interaction maps to one
/// synchronous method here; there is no shared mutable state behind it.
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Loaded sentence data
    store: SentenceStore,

    // @field: Passage generation service
    generation: GenerationService,

    // @field: Speech synthesis service
    speech: SpeechService,

    // @field: Session state
    session: StudySession,

    // @field: Store indices forming the active deck
    deck: Vec<usize>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let store = SentenceStore::load(&config.data_dir)?;
        Ok(Self::with_store(config, store))
    }

    /// Create a controller around an already loaded store
    pub fn with_store(config: Config, store: SentenceStore) -> Self {
        let generation = GenerationService::new(config.generation.clone());
        let speech = SpeechService::new(&config.speech);
        let deck = (0..store.len()).collect();

        info!(
            "Loaded {} sentences in {} groups",
            store.len(),
            store.group_count()
        );

        Self {
            config,
            store,
            generation,
            speech,
            session: StudySession::new(),
            deck,
        }
    }

    /// Create a controller over freshly written sample data
    pub fn with_sample_data(config: Config) -> Result<Self> {
        create_sample_data(&config.data_dir)?;
        Self::with_config(config)
    }

    /// The loaded sentence store
    pub fn store(&self) -> &SentenceStore {
        &self.store
    }

    /// The session state
    pub fn session(&self) -> &StudySession {
        &self.session
    }

    /// Mutable session state
    pub fn session_mut(&mut self) -> &mut StudySession {
        &mut self.session
    }

    /// Restrict the deck to one group, or None for all sentences.
    ///
    /// Changing the filter resets the cursor and any shuffled order.
    pub fn set_group_filter(&mut self, group_id: Option<u32>) {
        self.deck = match group_id {
            Some(id) => self
                .store
                .sentences
                .iter()
                .enumerate()
                .filter(|(_, s)| s.group_id == id)
                .map(|(i, _)| i)
                .collect(),
            None => (0..self.store.len()).collect(),
        };
        self.session.reset();
    }

    /// Switch between file order and shuffled order
    pub fn set_random_order(&mut self, random: bool) {
        if random {
            self.session.shuffle(self.deck.len());
        } else {
            self.session.clear_shuffle();
        }
    }

    /// The card under the cursor, highlighted and escaped for display
    pub fn current_card(&self) -> Option<StudyCard> {
        let deck_pos = self.session.current_deck_index(self.deck.len())?;
        let row = &self.store.sentences[self.deck[deck_pos]];

        let vocabulary = row.vocabulary();
        let words: Vec<String> = vocabulary.values().cloned().collect();

        let english_html = highlight::highlight_vocabulary(&row.english, &words);
        let japanese_html = highlight::highlight_translation(
            &row.japanese,
            &vocabulary,
            |id| self.store.word_master.meaning(id),
        );

        Some(StudyCard {
            key: row.key(),
            position: (self.session.position() % self.deck.len()) + 1,
            total: self.deck.len(),
            kind: row.kind.clone(),
            english: row.english.clone(),
            japanese: row.japanese.clone(),
            english_html,
            japanese_html,
            words,
        })
    }

    /// Rate the current card and move on; answers the rated key
    pub fn rate_current(&mut self, rating: Comprehension) -> Option<String> {
        let key = self.current_card()?.key;
        self.session.rate(key.clone(), rating);
        Some(key)
    }

    /// Aggregated progress numbers
    pub fn progress(&self) -> ProgressSummary {
        self.session.summary()
    }

    /// Generate a shadowing passage and install it in the session.
    ///
    /// Answers the number of parsed sentence pairs. Provider failures and
    /// an unparseable response both surface as errors for the caller to
    /// show; neither leaves a half-installed passage behind.
    pub async fn generate_passage(&mut self, genre: Genre, topic: &str) -> Result<usize> {
        if !self.generation.is_configured() {
            return Err(anyhow!(
                "No generation API key configured (set GOOGLE_API_KEY)"
            ));
        }

        let pairs = self.generation.generate(genre, topic).await?;
        if pairs.is_empty() {
            return Err(anyhow!(
                "Generated passage could not be parsed into sentence pairs"
            ));
        }

        debug!("Installed shadowing passage with {} pairs", pairs.len());
        let count = pairs.len();
        self.session.set_passage(pairs);
        Ok(count)
    }

    /// The shadowing sentence under the cursor, escaped for display
    pub fn current_shadowing_card(&self) -> Option<ShadowingCard> {
        let pair = self.session.current_shadowing_pair()?;
        Some(ShadowingCard {
            position: self.session.shadowing_position() + 1,
            total: self.session.passage().len(),
            english: pair.english.clone(),
            english_html: highlight::escape_html(&pair.english),
            japanese_html: highlight::escape_html(&pair.japanese),
        })
    }

    /// Render text to audio at the session's speed preset
    pub async fn speak(&self, text: &str) -> Result<AudioClip, SpeechError> {
        self.speech.synthesize(text, self.session.audio_rate).await
    }

    /// The configuration this controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }
}
