/*!
 * CSV-backed sentence and vocabulary store.
 *
 * Sentences live in `group*.csv` files inside the data directory and are
 * concatenated into one collection at load time. A separate
 * `word_master.csv` maps word identifiers to their Japanese meanings.
 *
 * Rows are typed records validated while loading: a file with a missing
 * column or an unparsable row is rejected as a whole (and logged), but one
 * bad file never aborts the scan of the remaining files.
 */

use std::collections::HashMap;
use std::path::Path;
use log::{warn, info};
use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::errors::StoreError;
use crate::file_utils::FileManager;
use crate::highlight::VocabularyMap;

// @const: Sentence file name prefix inside the data directory
const GROUP_FILE_PREFIX: &str = "group";

// @const: Word master file name inside the data directory
const WORD_MASTER_FILE: &str = "word_master.csv";

/// One study sentence row from a group file.
#[derive(Debug, Clone, Deserialize)]
pub struct SentenceRow {
    /// Group the sentence belongs to
    pub group_id: u32,

    /// Sentence identifier within its group
    pub sentence_id: u32,

    /// Free-form sentence kind (academic, conversation, ...)
    #[serde(rename = "sentence_type", default)]
    pub kind: String,

    /// English sentence text
    #[serde(rename = "sentence_content_en")]
    pub english: String,

    /// Japanese translation
    #[serde(rename = "translated_sentence")]
    pub japanese: String,

    /// Serialized vocabulary map, decoded on demand
    #[serde(rename = "words_contained_dict", default)]
    pub vocabulary_raw: String,
}

impl SentenceRow {
    /// Stable rating key for this sentence
    pub fn key(&self) -> String {
        format!("{}_{}", self.group_id, self.sentence_id)
    }

    /// Decode the vocabulary map attached to this row.
    pub fn vocabulary(&self) -> VocabularyMap {
        parse_vocabulary_map(&self.vocabulary_raw)
    }
}

/// Decode a serialized vocabulary map.
///
/// Accepts strict JSON objects and the legacy single-quoted form the data
/// files historically carried. Anything else decodes to an empty map for
/// that row; this function never fails.
pub fn parse_vocabulary_map(raw: &str) -> VocabularyMap {
    let raw = raw.trim();
    if raw.is_empty() {
        return VocabularyMap::new();
    }

    if let Ok(map) = serde_json::from_str::<HashMap<String, String>>(raw) {
        return map;
    }

    // Legacy rows use single-quoted keys and values.
    let rewritten = raw.replace('\'', "\"");
    serde_json::from_str::<HashMap<String, String>>(&rewritten).unwrap_or_default()
}

/// One row of the word master table.
#[derive(Debug, Clone, Deserialize)]
pub struct WordMasterRow {
    /// Word identifier referenced by vocabulary maps
    pub word_id: u32,

    /// The English word itself
    pub word: String,

    /// Japanese meaning; files without this column load as empty
    #[serde(default)]
    pub japanese_meaning: String,
}

/// Lookup table from word identifier to Japanese meaning.
#[derive(Debug, Default)]
pub struct WordMaster {
    entries: HashMap<u32, WordMasterRow>,
}

impl WordMaster {
    /// Number of known words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no word master data was loaded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the Japanese meaning for a vocabulary-map identifier.
    ///
    /// A non-numeric identifier, an unknown word, or a blank meaning all
    /// answer `None`; the caller skips that entry and carries on.
    pub fn meaning(&self, word_id: &str) -> Option<String> {
        let id: u32 = word_id.trim().parse().ok()?;
        let row = self.entries.get(&id)?;
        let meaning = row.japanese_meaning.trim();
        if meaning.is_empty() {
            None
        } else {
            Some(meaning.to_string())
        }
    }
}

/// All loaded sentence data.
#[derive(Debug, Default)]
pub struct SentenceStore {
    /// Sentences from every group file, in file order
    pub sentences: Vec<SentenceRow>,

    /// Word identifier lookup table
    pub word_master: WordMaster,
}

// @cache: First successful load is kept for the process lifetime
static STORE_CACHE: OnceCell<SentenceStore> = OnceCell::new();

impl SentenceStore {
    /// Load every sentence file under the data directory.
    ///
    /// A file that fails to parse is logged and skipped; the load only
    /// fails when no sentence at all could be read.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        let mut sentences = Vec::new();

        let files = FileManager::find_files(data_dir, "csv").unwrap_or_default();
        for file in files.iter().filter(|f| is_group_file(f)) {
            let name = file_name(file);
            match Self::read_sentence_file(file) {
                Ok(mut rows) => {
                    info!("Loaded {} sentences from {}", rows.len(), name);
                    sentences.append(&mut rows);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", name, e);
                }
            }
        }

        if sentences.is_empty() {
            return Err(StoreError::NoData(data_dir.display().to_string()));
        }

        let word_master = Self::read_word_master(data_dir);

        Ok(SentenceStore {
            sentences,
            word_master,
        })
    }

    /// Load once and keep the result for the process lifetime.
    ///
    /// Later calls return the first loaded store regardless of the
    /// directory argument; staleness is not a concern here.
    pub fn load_cached<P: AsRef<Path>>(data_dir: P) -> Result<&'static Self, StoreError> {
        STORE_CACHE.get_or_try_init(|| Self::load(data_dir))
    }

    /// Number of loaded sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// True when the store holds no sentences
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Number of distinct sentence groups
    pub fn group_count(&self) -> usize {
        let mut groups: Vec<u32> = self.sentences.iter().map(|s| s.group_id).collect();
        groups.sort_unstable();
        groups.dedup();
        groups.len()
    }

    /// Sentences belonging to one group, keeping file order
    pub fn group(&self, group_id: u32) -> Vec<&SentenceRow> {
        self.sentences.iter().filter(|s| s.group_id == group_id).collect()
    }

    // @reads: One group file into typed rows, failing fast on bad records
    fn read_sentence_file(path: &Path) -> Result<Vec<SentenceRow>, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| StoreError::ReadFailed {
                file: file_name(path),
                message: e.to_string(),
            })?;

        let mut rows = Vec::new();
        for record in reader.deserialize::<SentenceRow>() {
            let row = record.map_err(|e| StoreError::InvalidRecord {
                file: file_name(path),
                message: e.to_string(),
            })?;
            rows.push(row);
        }
        Ok(rows)
    }

    // @reads: Word master table; a missing or broken file yields an empty table
    fn read_word_master(data_dir: &Path) -> WordMaster {
        let path = data_dir.join(WORD_MASTER_FILE);
        if !FileManager::file_exists(&path) {
            warn!("{} not found, translation highlighting disabled", WORD_MASTER_FILE);
            return WordMaster::default();
        }

        let reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(&path);
        let mut reader = match reader {
            Ok(r) => r,
            Err(e) => {
                warn!("Failed to read {}: {}", WORD_MASTER_FILE, e);
                return WordMaster::default();
            }
        };

        let mut entries = HashMap::new();
        for record in reader.deserialize::<WordMasterRow>() {
            match record {
                Ok(row) => {
                    entries.insert(row.word_id, row);
                }
                Err(e) => {
                    warn!("Skipping word master row: {}", e);
                }
            }
        }
        WordMaster { entries }
    }
}

// @checks: File name looks like a sentence group file
fn is_group_file(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with(GROUP_FILE_PREFIX))
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Write a small sample data set for first runs and tests.
pub fn create_sample_data<P: AsRef<Path>>(data_dir: P) -> anyhow::Result<()> {
    let data_dir = data_dir.as_ref();
    FileManager::ensure_dir(data_dir)?;

    let mut writer = csv::Writer::from_path(data_dir.join("group1.csv"))?;
    writer.write_record([
        "group_id",
        "sentence_id",
        "sentence_type",
        "sentence_content_en",
        "translated_sentence",
        "words_contained_dict",
    ])?;
    writer.write_record([
        "1",
        "1",
        "academic",
        "The rapid advancement of artificial intelligence has revolutionized various industries.",
        "人工知能の急速な発展は、様々な産業に革命をもたらしました。",
        "{'1': 'artificial', '2': 'intelligence', '3': 'revolutionized'}",
    ])?;
    writer.write_record([
        "1",
        "2",
        "conversation",
        "Could you please explain how machine learning algorithms work in simple terms?",
        "機械学習アルゴリズムがどのように動作するかを簡単に説明していただけますか？",
        "{'4': 'machine', '5': 'learning', '6': 'algorithms'}",
    ])?;
    writer.write_record([
        "1",
        "3",
        "free",
        "Data science combines statistics, programming, and domain expertise to extract insights.",
        "データサイエンスは統計学、プログラミング、ドメイン専門知識を組み合わせて洞察を抽出します。",
        "{'7': 'statistics', '8': 'programming', '9': 'expertise'}",
    ])?;
    writer.flush()?;

    let mut writer = csv::Writer::from_path(data_dir.join(WORD_MASTER_FILE))?;
    writer.write_record(["word_id", "word", "japanese_meaning"])?;
    for (id, word, meaning) in [
        ("1", "artificial", "人工の"),
        ("2", "intelligence", "知能"),
        ("3", "revolutionized", "革命をもたらした"),
        ("4", "machine", "機械"),
        ("5", "learning", "学習"),
        ("6", "algorithms", "アルゴリズム"),
        ("7", "statistics", "統計学"),
        ("8", "programming", "プログラミング"),
        ("9", "expertise", "専門知識"),
    ] {
        writer.write_record([id, word, meaning])?;
    }
    writer.flush()?;

    Ok(())
}
