use serde::{Deserialize, Serialize};

// @module: Generated-passage parsing into aligned sentence pairs

/// One English sentence aligned with its Japanese translation.
///
/// Pairs are only ever emitted with both fields non-empty; a dangling
/// English line with no translation is dropped by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    /// English sentence text
    pub english: String,

    /// Japanese translation text
    pub japanese: String,
}

impl SentencePair {
    /// Create a new sentence pair
    pub fn new(english: impl Into<String>, japanese: impl Into<String>) -> Self {
        SentencePair {
            english: english.into(),
            japanese: japanese.into(),
        }
    }
}

// @returns: true when the line reads as an English sentence start
//
// A line counts as English when it begins with an uppercase Latin letter
// and contains at least one alphabetic character. Everything else
// (Japanese text, numbering, markers) is treated as a translation line.
fn is_english_line(line: &str) -> bool {
    let mut chars = line.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => line.chars().any(char::is_alphabetic),
        _ => false,
    }
}

/// Split a raw generated passage into ordered sentence pairs.
///
/// The expected shape is alternating lines: an English sentence followed by
/// its Japanese translation, possibly separated by blank lines. Lines that
/// do not fit are handled by a single pending accumulator:
///
/// - a new English line flushes the accumulator when both slots are filled,
///   then restarts it with the new sentence;
/// - a translation line overwrites the pending translation slot, so with
///   several translation lines in a row only the last one before the next
///   English line is kept;
/// - at end of input the accumulator is flushed one last time when complete.
///
/// Malformed or empty input yields an empty vector; this function never
/// fails.
pub fn parse_generated_content(raw: &str) -> Vec<SentencePair> {
    let mut pairs = Vec::new();
    let mut current_en = String::new();
    let mut current_ja = String::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_english_line(line) {
            if !current_en.is_empty() && !current_ja.is_empty() {
                pairs.push(SentencePair::new(
                    std::mem::take(&mut current_en),
                    std::mem::take(&mut current_ja),
                ));
            }
            current_en = line.to_string();
            current_ja.clear();
        } else {
            // Last translation line before the next English line wins.
            current_ja = line.to_string();
        }
    }

    if !current_en.is_empty() && !current_ja.is_empty() {
        pairs.push(SentencePair::new(current_en, current_ja));
    }

    pairs
}
