use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Study source language code (ISO)
    pub source_language: String,

    /// Study target language code (ISO)
    pub target_language: String,

    /// Directory holding group*.csv and word_master.csv
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Passage generation config
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Speech synthesis config
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Passage generation settings (Gemini generateContent API)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Model name
    #[serde(default = "default_generation_model")]
    pub model: String,

    /// API key; the GOOGLE_API_KEY environment variable is the fallback
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL
    #[serde(default = "default_generation_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens to generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// API key with environment fallback.
    ///
    /// An empty result is not an error here; the generation call reports a
    /// visible failure when it actually needs a key.
    pub fn resolved_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var("GOOGLE_API_KEY").unwrap_or_default()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_generation_model(),
            api_key: String::new(),
            endpoint: default_generation_endpoint(),
            timeout_secs: default_generation_timeout_secs(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Speech synthesis settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Directory searched for Piper voice models
    #[serde(default = "default_voices_dir")]
    pub voices_dir: String,

    /// Explicit Piper voice model path; PIPER_VOICE_PATH also works
    #[serde(default)]
    pub voice_path: Option<String>,

    /// Speech locale for the fallback synthesizer
    #[serde(default = "default_speech_locale")]
    pub locale: String,

    /// Synthesis timeout in seconds
    #[serde(default = "default_speech_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voices_dir: default_voices_dir(),
            voice_path: None,
            locale: default_speech_locale(),
            timeout_secs: default_speech_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_generation_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_generation_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_generation_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    4096
}

fn default_voices_dir() -> String {
    "voices".to_string()
}

fn default_speech_locale() -> String {
    "en-GB".to_string()
}

fn default_speech_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::validate_language_code(&self.source_language)?;
        crate::language_utils::validate_language_code(&self.target_language)?;

        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("Data directory must not be empty"));
        }

        if self.generation.model.trim().is_empty() {
            return Err(anyhow!("Generation model must not be empty"));
        }

        // A missing API key is reported when generation is actually used,
        // so the rest of the app keeps working without one.
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "ja".to_string(),
            data_dir: default_data_dir(),
            generation: GenerationConfig::default(),
            speech: SpeechConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
