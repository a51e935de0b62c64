use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// The application only carries a handful of codes (study source/target
/// plus a speech locale), so this stays deliberately small: validate a
/// code, and resolve its English name for display.
/// Validate that a code is a known ISO 639-1 or ISO 639-3 language code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized = code.trim().to_lowercase();

    let known = match normalized.len() {
        2 => Language::from_639_1(&normalized).is_some(),
        3 => Language::from_639_3(&normalized).is_some(),
        _ => false,
    };

    if known {
        Ok(())
    } else {
        Err(anyhow!("Invalid language code: {}", code))
    }
}

/// English display name for an ISO 639 language code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    let language = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    };

    language
        .map(|l| l.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}

/// Lowercase a speech locale for TTS endpoints ("en-GB" -> "en-gb")
pub fn to_speech_locale(locale: &str) -> String {
    locale.trim().to_lowercase()
}
