/*!
 * Tests for the speech service fallback chain
 */

use lexishadow::app_config::SpeechConfig;
use lexishadow::errors::SpeechError;
use lexishadow::speech::{SpeechService, PIPER_MAX_RATE, PIPER_MIN_RATE, SLOW_RATE_THRESHOLD};

fn isolated_config(temp_dir: &tempfile::TempDir) -> SpeechConfig {
    SpeechConfig {
        voices_dir: temp_dir.path().join("voices").display().to_string(),
        ..SpeechConfig::default()
    }
}

/// Test that empty text is rejected before any backend runs
#[tokio::test]
async fn test_synthesize_withEmptyText_shouldFailFast() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let service = SpeechService::new(&isolated_config(&temp_dir));

    let result = service.synthesize("   ", 1.0).await;

    assert!(matches!(result, Err(SpeechError::EmptyText)));
}

/// Test voice discovery with no voices installed
#[test]
fn test_speechService_withoutVoices_shouldHaveNoLocalBackend() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let service = SpeechService::new(&isolated_config(&temp_dir));

    assert!(!service.has_local_voice());
}

/// Test the rate window constants stay coherent
#[test]
fn test_rateConstants_shouldFormAValidWindow() {
    assert!(PIPER_MIN_RATE < PIPER_MAX_RATE);
    assert!(SLOW_RATE_THRESHOLD < PIPER_MIN_RATE);
    assert!((PIPER_MIN_RATE..=PIPER_MAX_RATE).contains(&1.0));
}
