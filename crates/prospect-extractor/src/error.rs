//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction and ingestion
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transcription service error
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// Transcription did not finish in time
    #[error("Transcription timeout")]
    Timeout,

    /// Opportunity store error
    #[error("Store error: {0}")]
    Store(String),

    /// Keyword suggestion error
    #[error("Keyword suggestion error: {0}")]
    KeywordSuggestion(String),
}
