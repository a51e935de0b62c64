/*!
 * Tests for the highlight annotator
 */

use lexishadow::highlight::{
    HighlightCategory, VocabularyMap, escape_html, find_word_positions, highlight_translation,
    highlight_vocabulary, render_highlighted, resolve_spans,
};

/// Undo entity escaping for the round-trip property
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Strip the highlight markers, keeping all literal text
fn strip_markers(html: &str) -> String {
    html.replace("<mark class=\"vocab-highlight\">", "")
        .replace("<mark class=\"japanese-highlight\">", "")
        .replace("</mark>", "")
}

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Test the single-match happy path
#[test]
fn test_highlight_withSingleMatch_shouldWrapExactlyOnce() {
    let html = highlight_vocabulary("The cat sat.", &words(&["cat"]));

    assert_eq!(html, "The <mark class=\"vocab-highlight\">cat</mark> sat.");
    assert_eq!(html.matches("<mark").count(), 1);
}

/// Test that matching preserves the sentence's original casing
#[test]
fn test_highlight_withDifferentCase_shouldKeepSourceCasing() {
    let html = highlight_vocabulary("CATS sleep all day.", &words(&["cats"]));

    assert!(html.contains("<mark class=\"vocab-highlight\">CATS</mark>"));
}

/// Test substring matching inside longer words
#[test]
fn test_highlight_withSubstringTarget_shouldMatchInsideWords() {
    let html = highlight_vocabulary("The catalog is new.", &words(&["cat"]));

    assert!(html.contains("<mark class=\"vocab-highlight\">cat</mark>alog"));
}

/// Test hostile sentence content
#[test]
fn test_highlight_withScriptTag_shouldNeverEmitUnescapedMarkup() {
    let html = highlight_vocabulary("<script>alert(1)</script> cat", &words(&["cat"]));

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("<mark class=\"vocab-highlight\">cat</mark>"));
}

/// Test hostile target words
#[test]
fn test_highlight_withHostileTargetWord_shouldEscapeInsideMarker() {
    let html = highlight_vocabulary("a <b> c", &words(&["<b>"]));

    assert!(html.contains("<mark class=\"vocab-highlight\">&lt;b&gt;</mark>"));
    assert!(!html.contains("<b>"));
}

/// Test duplicate targets producing identical spans
#[test]
fn test_highlight_withDuplicateTargets_shouldRenderOneMarker() {
    let html = highlight_vocabulary("The cat sat.", &words(&["cat", "cat"]));

    assert_eq!(html.matches("<mark").count(), 1);
}

/// Test the empty target list
#[test]
fn test_highlight_withNoTargets_shouldEqualEscapedSentence() {
    let sentence = "Tom & Jerry's \"show\" <3";
    let html = highlight_vocabulary(sentence, &[]);

    assert_eq!(html, escape_html(sentence));
    assert!(!html.contains("<mark"));
}

/// Test targets that match nothing
#[test]
fn test_highlight_withNoMatches_shouldEqualEscapedSentence() {
    let html = highlight_vocabulary("Nothing here.", &words(&["zebra"]));

    assert_eq!(html, escape_html("Nothing here."));
}

/// Test the round-trip property: no characters lost or duplicated
#[test]
fn test_highlight_roundTrip_shouldRecoverOriginalSentence() {
    let sentence = "Tom & Jerry <scripted> a 'cat' \"show\" about cats.";
    let html = highlight_vocabulary(sentence, &words(&["cat", "show", "&"]));

    assert_eq!(unescape(&strip_markers(&html)), sentence);
}

/// Test multiple occurrences of one target
#[test]
fn test_highlight_withRepeatedWord_shouldMarkEveryOccurrence() {
    let html = highlight_vocabulary("cat and cat and CAT", &words(&["cat"]));

    assert_eq!(html.matches("<mark").count(), 3);
}

/// Test position finding offsets and categories
#[test]
fn test_findWordPositions_shouldRecordOffsetsAndCasing() {
    let spans = find_word_positions("A Cat here", &words(&["cat"]), HighlightCategory::Vocabulary);

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].start, 2);
    assert_eq!(spans[0].end, 5);
    assert_eq!(spans[0].text, "Cat");
    assert_eq!(spans[0].category, HighlightCategory::Vocabulary);
}

/// Test blank targets are ignored
#[test]
fn test_findWordPositions_withBlankTarget_shouldSkipIt() {
    let spans = find_word_positions("abc", &words(&["", "  "]), HighlightCategory::Vocabulary);
    assert!(spans.is_empty());
}

/// Test span resolution: dedup plus stable start ordering
#[test]
fn test_resolveSpans_shouldDedupAndSortByStart() {
    let sentence = "alpha beta";
    let mut spans = find_word_positions(sentence, &words(&["beta"]), HighlightCategory::Vocabulary);
    spans.extend(find_word_positions(sentence, &words(&["alpha", "beta"]), HighlightCategory::Vocabulary));

    let resolved = resolve_spans(spans);

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].text, "alpha");
    assert_eq!(resolved[1].text, "beta");
}

/// Test the documented overlap policy: first span in sorted order wins
#[test]
fn test_render_withOverlappingSpans_shouldKeepFirstAndStayLossless() {
    let sentence = "interconnected systems";
    // "intercon" and "connected" genuinely overlap inside the sentence.
    let spans = resolve_spans(find_word_positions(
        sentence,
        &words(&["intercon", "connected"]),
        HighlightCategory::Vocabulary,
    ));
    let html = render_highlighted(sentence, &spans);

    assert!(html.contains("<mark class=\"vocab-highlight\">intercon</mark>"));
    // The overlapping later span is skipped, not nested or duplicated.
    assert_eq!(html.matches("<mark").count(), 1);
    assert_eq!(unescape(&strip_markers(&html)), sentence);
}

/// Test the translation pass over a Japanese sentence
#[test]
fn test_highlightTranslation_withKnownIds_shouldMarkMeanings() {
    let mut vocabulary = VocabularyMap::new();
    vocabulary.insert("1".to_string(), "cat".to_string());

    let html = highlight_translation("猫はマットの上。", &vocabulary, |id| {
        (id == "1").then(|| "猫".to_string())
    });

    assert!(html.contains("<mark class=\"japanese-highlight\">猫</mark>"));
}

/// Test that lookup misses skip the entry without aborting the rendering
#[test]
fn test_highlightTranslation_withLookupMisses_shouldStillRender() {
    let mut vocabulary = VocabularyMap::new();
    vocabulary.insert("not-a-number".to_string(), "cat".to_string());
    vocabulary.insert("99".to_string(), "mat".to_string());
    vocabulary.insert("1".to_string(), "cat".to_string());

    // Only id "1" resolves; the blank meaning and the unknown id are skipped.
    let html = highlight_translation("猫がいる。", &vocabulary, |id| match id {
        "1" => Some("猫".to_string()),
        "99" => Some("   ".to_string()),
        _ => None,
    });

    assert!(html.contains("<mark class=\"japanese-highlight\">猫</mark>"));
    assert_eq!(html.matches("<mark").count(), 1);
}

/// Test the translation pass with an empty vocabulary map
#[test]
fn test_highlightTranslation_withEmptyMap_shouldEqualEscapedSentence() {
    let html = highlight_translation("訳文です。", &VocabularyMap::new(), |_| None);
    assert_eq!(html, escape_html("訳文です。"));
}

/// Test escaping of every special character
#[test]
fn test_escapeHtml_shouldEscapeAllSpecials() {
    assert_eq!(escape_html("&<>\"'"), "&amp;&lt;&gt;&quot;&#x27;");
    assert_eq!(escape_html("plain text"), "plain text");
}
