/*!
 * Common test utilities for the lexishadow test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sentence group file with two rows, legacy-quoted vocabulary included
pub fn create_sample_group_file(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = r#"group_id,sentence_id,sentence_type,sentence_content_en,translated_sentence,words_contained_dict
1,1,academic,The cat sat on the mat.,猫はマットの上に座った。,"{'1': 'cat', '2': 'mat'}"
1,2,conversation,Could you pass the salt?,塩を取ってもらえますか？,"{""3"": ""salt""}"
"#;
    create_test_file(dir, filename, content)
}

/// Creates a word master file matching the sample group file
pub fn create_sample_word_master(dir: &PathBuf) -> Result<PathBuf> {
    let content = "word_id,word,japanese_meaning\n1,cat,猫\n2,mat,マット\n3,salt,塩\n";
    create_test_file(dir, "word_master.csv", content)
}

/// A well-formed generated passage: alternating English/Japanese lines
pub fn sample_generated_text() -> &'static str {
    "Solar panels convert sunlight into electricity.\n\
     太陽光パネルは日光を電気に変換します。\n\
     \n\
     Wind turbines capture the energy of moving air.\n\
     風力タービンは動く空気のエネルギーを捉えます。\n"
}
