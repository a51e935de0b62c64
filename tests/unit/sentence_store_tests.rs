/*!
 * Tests for the CSV sentence store
 */

use anyhow::Result;
use lexishadow::sentence_store::{SentenceStore, create_sample_data, parse_vocabulary_map};
use crate::common;

/// Test loading and concatenating several group files
#[test]
fn test_load_withTwoGroupFiles_shouldConcatenateInFileOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_sample_group_file(&dir, "group1.csv")?;
    common::create_test_file(
        &dir,
        "group2.csv",
        "group_id,sentence_id,sentence_type,sentence_content_en,translated_sentence,words_contained_dict\n\
         2,1,free,Water boils at one hundred degrees.,水は百度で沸騰する。,{}\n",
    )?;

    let store = SentenceStore::load(&dir)?;

    assert_eq!(store.len(), 3);
    assert_eq!(store.group_count(), 2);
    assert_eq!(store.sentences[0].english, "The cat sat on the mat.");
    assert_eq!(store.sentences[2].group_id, 2);
    Ok(())
}

/// Test that non-group CSV files are ignored by the scan
#[test]
fn test_load_withUnrelatedCsv_shouldIgnoreIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_sample_group_file(&dir, "group1.csv")?;
    common::create_test_file(&dir, "notes.csv", "a,b\n1,2\n")?;

    let store = SentenceStore::load(&dir)?;
    assert_eq!(store.len(), 2);
    Ok(())
}

/// Test that one broken file is skipped while the rest still loads
#[test]
fn test_load_withOneBrokenFile_shouldSkipItAndKeepTheRest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_sample_group_file(&dir, "group1.csv")?;
    // Missing the required sentence columns entirely.
    common::create_test_file(&dir, "group2.csv", "foo,bar\n1,2\n")?;

    let store = SentenceStore::load(&dir)?;
    assert_eq!(store.len(), 2);
    Ok(())
}

/// Test that an empty data directory is a load error
#[test]
fn test_load_withNoGroupFiles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = SentenceStore::load(temp_dir.path());

    assert!(result.is_err());
    Ok(())
}

/// Test the rating key format
#[test]
fn test_sentenceRow_key_shouldJoinGroupAndSentenceId() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_sample_group_file(&dir, "group1.csv")?;

    let store = SentenceStore::load(&dir)?;
    assert_eq!(store.sentences[0].key(), "1_1");
    Ok(())
}

/// Test vocabulary decoding of strict JSON
#[test]
fn test_parseVocabularyMap_withStrictJson_shouldDecode() {
    let map = parse_vocabulary_map(r#"{"1": "artificial", "2": "intelligence"}"#);

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("1").map(String::as_str), Some("artificial"));
}

/// Test vocabulary decoding of the legacy single-quoted form
#[test]
fn test_parseVocabularyMap_withLegacyQuotes_shouldDecode() {
    let map = parse_vocabulary_map("{'1': 'machine', '2': 'learning'}");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("2").map(String::as_str), Some("learning"));
}

/// Test vocabulary decoding failure modes
#[test]
fn test_parseVocabularyMap_withMalformedInput_shouldBeEmpty() {
    assert!(parse_vocabulary_map("").is_empty());
    assert!(parse_vocabulary_map("   ").is_empty());
    assert!(parse_vocabulary_map("not a dict").is_empty());
    assert!(parse_vocabulary_map("{'unterminated': ").is_empty());
    // Values of the wrong type do not decode either.
    assert!(parse_vocabulary_map(r#"{"1": 2}"#).is_empty());
}

/// Test vocabulary decoding straight from a loaded row
#[test]
fn test_sentenceRow_vocabulary_shouldDecodeBothQuotingStyles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_sample_group_file(&dir, "group1.csv")?;

    let store = SentenceStore::load(&dir)?;
    let legacy = store.sentences[0].vocabulary();
    let strict = store.sentences[1].vocabulary();

    assert_eq!(legacy.get("1").map(String::as_str), Some("cat"));
    assert_eq!(strict.get("3").map(String::as_str), Some("salt"));
    Ok(())
}

/// Test word master lookups and their miss modes
#[test]
fn test_wordMaster_meaning_shouldResolveAndSwallowMisses() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_sample_group_file(&dir, "group1.csv")?;
    common::create_sample_word_master(&dir)?;

    let store = SentenceStore::load(&dir)?;

    assert_eq!(store.word_master.meaning("1"), Some("猫".to_string()));
    assert_eq!(store.word_master.meaning("99"), None);
    assert_eq!(store.word_master.meaning("not-a-number"), None);
    Ok(())
}

/// Test a missing word master file
#[test]
fn test_load_withoutWordMaster_shouldYieldEmptyMaster() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_sample_group_file(&dir, "group1.csv")?;

    let store = SentenceStore::load(&dir)?;
    assert!(store.word_master.is_empty());
    assert_eq!(store.word_master.meaning("1"), None);
    Ok(())
}

/// Test a word master without the meaning column
#[test]
fn test_wordMaster_withoutMeaningColumn_shouldAnswerNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_sample_group_file(&dir, "group1.csv")?;
    common::create_test_file(&dir, "word_master.csv", "word_id,word\n1,cat\n")?;

    let store = SentenceStore::load(&dir)?;
    assert_eq!(store.word_master.len(), 1);
    assert_eq!(store.word_master.meaning("1"), None);
    Ok(())
}

/// Test the sample-data writer round trip
#[test]
fn test_createSampleData_shouldProduceALoadableStore() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    create_sample_data(temp_dir.path())?;

    let store = SentenceStore::load(temp_dir.path())?;

    assert_eq!(store.len(), 3);
    assert_eq!(store.group_count(), 1);
    assert_eq!(store.word_master.len(), 9);
    // Sample rows carry the legacy quoting, which must decode.
    assert!(!store.sentences[0].vocabulary().is_empty());
    Ok(())
}
