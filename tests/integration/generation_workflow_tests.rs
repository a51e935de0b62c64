/*!
 * Generation pipeline tests with a mock provider
 */

use lexishadow::errors::ProviderError;
use lexishadow::generation::generate_with;
use crate::common;
use crate::common::mock_provider::MockGenerator;

/// Test the full request -> response -> parse pipeline
#[tokio::test]
async fn test_generateWith_withWellFormedResponse_shouldYieldPairs() {
    let provider = MockGenerator::new(common::sample_generated_text());

    let pairs = generate_with(&provider, "prompt".to_string()).await.unwrap();

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].english, "Solar panels convert sunlight into electricity.");
    assert_eq!(pairs[1].japanese, "風力タービンは動く空気のエネルギーを捉えます。");

    let tracker = provider.tracker();
    let tracker = tracker.lock().unwrap();
    assert_eq!(tracker.call_count, 1);
    assert_eq!(tracker.last_request.as_deref(), Some("prompt"));
}

/// Test that provider failures surface as errors
#[tokio::test]
async fn test_generateWith_withFailingProvider_shouldPropagateError() {
    let provider = MockGenerator::failing();

    let result = generate_with(&provider, "prompt".to_string()).await;

    assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
}

/// Test that an unparseable response degrades to no pairs, not an error
#[tokio::test]
async fn test_generateWith_withUnparseableResponse_shouldYieldNoPairs() {
    let provider = MockGenerator::new("ただの日本語の段落です。構造がありません。");

    let pairs = generate_with(&provider, "prompt".to_string()).await.unwrap();

    assert!(pairs.is_empty());
}

/// Test that a response with dangling sentences keeps only complete pairs
#[tokio::test]
async fn test_generateWith_withDanglingSentence_shouldKeepCompletePairsOnly() {
    let provider = MockGenerator::new(
        "Complete sentence here.\n完全な文です。\nDangling English sentence.",
    );

    let pairs = generate_with(&provider, "prompt".to_string()).await.unwrap();

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].japanese, "完全な文です。");
}
