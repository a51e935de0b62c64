/*!
 * Error types for the lexishadow application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * The two core text utilities (content parser, highlight annotator) have no
 * error type on purpose: they degrade to "no pairs" / "no highlights" and
 * never fail past their boundary.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the text-generation API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while loading the sentence data files
#[derive(Error, Debug)]
pub enum StoreError {
    /// A data file could not be read at all
    #[error("Failed to read data file {file}: {message}")]
    ReadFailed {
        /// Offending file name
        file: String,
        /// Underlying error text
        message: String
    },

    /// A data file is missing a required column or has an unparsable row
    #[error("Invalid record in {file}: {message}")]
    InvalidRecord {
        /// Offending file name
        file: String,
        /// Underlying error text
        message: String
    },

    /// The data directory holds no sentence files at all
    #[error("No sentence files found in {0}")]
    NoData(String),
}

/// Errors that can occur during speech synthesis
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Nothing to say
    #[error("Refusing to synthesize empty text")]
    EmptyText,

    /// The synthesis backend produced no usable audio
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Every configured backend failed
    #[error("All speech backends failed: {0}")]
    AllBackendsFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the generation provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the sentence store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from speech synthesis
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
