/*!
 * Tests for language utilities
 */

use lexishadow::language_utils::{get_language_name, to_speech_locale, validate_language_code};

/// Test validation of two-letter codes
#[test]
fn test_validate_withPart1Codes_shouldAccept() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("ja").is_ok());
    assert!(validate_language_code(" EN ").is_ok());
}

/// Test validation of three-letter codes
#[test]
fn test_validate_withPart3Codes_shouldAccept() {
    assert!(validate_language_code("eng").is_ok());
    assert!(validate_language_code("jpn").is_ok());
}

/// Test validation failures
#[test]
fn test_validate_withBogusCodes_shouldReject() {
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("english").is_err());
}

/// Test display names
#[test]
fn test_getLanguageName_shouldResolveEnglishNames() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
    assert!(get_language_name("zz").is_err());
}

/// Test speech locale normalization
#[test]
fn test_toSpeechLocale_shouldLowercase() {
    assert_eq!(to_speech_locale("en-GB"), "en-gb");
    assert_eq!(to_speech_locale(" EN "), "en");
}
