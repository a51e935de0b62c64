/*!
 * # lexishadow
 *
 * A Rust library for personal English study: bilingual sentence cards with
 * vocabulary highlighting, AI-generated reading passages for shadowing
 * practice, and speech synthesis.
 *
 * ## Features
 *
 * - Load study sentences and vocabulary from CSV data files
 * - Parse AI-generated passages into aligned English/Japanese pairs
 * - Highlight target vocabulary with injection-safe HTML rendering
 * - Generate passages on a topic through the Gemini API
 * - Render audio through a local Piper voice with an HTTP fallback
 * - Track comprehension ratings across a study session
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `sentence_store`: CSV sentence and vocabulary loading
 * - `content_parser`: Generated-passage parsing into sentence pairs
 * - `highlight`: Vocabulary highlighting and HTML escaping
 * - `generation`: Prompt templates and the passage generation service
 * - `speech`: Speech synthesis backends and the fallback chain
 * - `session`: Study session state and progress summaries
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementation for the text-generation API
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod content_parser;
pub mod highlight;
pub mod sentence_store;
pub mod generation;
pub mod speech;
pub mod session;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use content_parser::{SentencePair, parse_generated_content};
pub use highlight::{highlight_vocabulary, highlight_translation, HighlightCategory, HighlightSpan, VocabularyMap};
pub use sentence_store::{SentenceStore, WordMaster};
pub use session::{Comprehension, StudySession};
pub use errors::{AppError, ProviderError, SpeechError, StoreError};
