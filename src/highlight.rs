/*!
 * Highlight annotation for study sentences.
 *
 * Locates target vocabulary inside a sentence and renders the sentence as
 * escaped HTML with matches wrapped in `<mark>` elements. The output is safe
 * to hand to a rendering surface that performs no sanitizing of its own:
 * every literal character is entity-escaped, whether it sits inside or
 * outside a highlight.
 */

use std::collections::HashMap;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Per-sentence association of target words, keyed by an arbitrary
/// identifier. Order is irrelevant; the map may be empty.
pub type VocabularyMap = HashMap<String, String>;

/// What kind of vocabulary a span marks, which decides its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightCategory {
    /// A target word inside the English sentence
    Vocabulary,
    /// A translated meaning inside the Japanese sentence
    Translation,
}

impl HighlightCategory {
    /// CSS class emitted on the `<mark>` element
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocab-highlight",
            Self::Translation => "japanese-highlight",
        }
    }
}

/// A contiguous byte range of a sentence marked for emphasis.
///
/// Invariants: `start < end`, `end <= sentence.len()`, and `text` is the
/// matched substring with its original casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Start byte offset into the sentence
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Matched substring, casing as it appears in the sentence
    pub text: String,
    /// Highlight category
    pub category: HighlightCategory,
}

/// Find every case-insensitive occurrence of each target word.
///
/// Matching is exact-substring: no tokenizing, no word boundaries, so a
/// target inside a longer word also matches. Blank targets are skipped,
/// since a zero-width match cannot form a valid span.
pub fn find_word_positions(
    sentence: &str,
    target_words: &[String],
    category: HighlightCategory,
) -> Vec<HighlightSpan> {
    let mut spans = Vec::new();

    for word in target_words {
        let word = word.trim();
        if word.is_empty() {
            continue;
        }
        let Ok(pattern) = RegexBuilder::new(&regex::escape(word))
            .case_insensitive(true)
            .build()
        else {
            continue;
        };
        for m in pattern.find_iter(sentence) {
            spans.push(HighlightSpan {
                start: m.start(),
                end: m.end(),
                text: sentence[m.start()..m.end()].to_string(),
                category,
            });
        }
    }

    spans
}

/// Drop spans whose (start, end) duplicates an earlier span, then order by
/// start offset. The sort is stable, so among equal starts the earlier
/// recorded span stays first.
pub fn resolve_spans(spans: Vec<HighlightSpan>) -> Vec<HighlightSpan> {
    let mut unique: Vec<HighlightSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        if !unique.iter().any(|s| s.start == span.start && s.end == span.end) {
            unique.push(span);
        }
    }
    unique.sort_by_key(|s| s.start);
    unique
}

/// Escape a string for literal inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render a sentence with the given spans wrapped in `<mark>` elements.
///
/// Spans must already be resolved (deduplicated, sorted by start). A span
/// that begins before the previous one ended is skipped — first match in
/// sorted order wins — so every character of the sentence appears exactly
/// once in the output.
pub fn render_highlighted(sentence: &str, spans: &[HighlightSpan]) -> String {
    if spans.is_empty() {
        return escape_html(sentence);
    }

    let mut result = String::with_capacity(sentence.len() + spans.len() * 32);
    let mut last_end = 0usize;

    for span in spans {
        if span.start < last_end {
            continue;
        }
        if span.start > last_end {
            result.push_str(&escape_html(&sentence[last_end..span.start]));
        }
        result.push_str("<mark class=\"");
        result.push_str(span.category.css_class());
        result.push_str("\">");
        result.push_str(&escape_html(&span.text));
        result.push_str("</mark>");
        last_end = span.end;
    }

    if last_end < sentence.len() {
        result.push_str(&escape_html(&sentence[last_end..]));
    }

    result
}

/// Highlight target vocabulary inside an English sentence.
///
/// With no targets, or none matching, this is plain escaping.
pub fn highlight_vocabulary(sentence: &str, target_words: &[String]) -> String {
    if target_words.is_empty() {
        return escape_html(sentence);
    }
    let spans = resolve_spans(find_word_positions(
        sentence,
        target_words,
        HighlightCategory::Vocabulary,
    ));
    render_highlighted(sentence, &spans)
}

/// Highlight translated meanings inside a Japanese sentence.
///
/// For each identifier in the vocabulary map the lookup supplies the
/// translated meaning to search for. An absent identifier, or a meaning
/// that is empty after trimming, skips that entry only — a bad row never
/// takes down the whole sentence's rendering.
pub fn highlight_translation<F>(
    sentence: &str,
    vocabulary: &VocabularyMap,
    meaning_lookup: F,
) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if vocabulary.is_empty() {
        return escape_html(sentence);
    }

    let mut targets = Vec::new();
    for id in vocabulary.keys() {
        if let Some(meaning) = meaning_lookup(id) {
            let meaning = meaning.trim();
            if !meaning.is_empty() {
                targets.push(meaning.to_string());
            }
        }
    }

    if targets.is_empty() {
        return escape_html(sentence);
    }

    let spans = resolve_spans(find_word_positions(
        sentence,
        &targets,
        HighlightCategory::Translation,
    ));
    render_highlighted(sentence, &spans)
}
