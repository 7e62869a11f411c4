//! # Error Types
//!
//! Crate-level errors plus the per-envelope failure taxonomy used by the batch consumer.
//! Envelope failures are never propagated past the consumer; they are logged and turned
//! into `batchItemFailures` entries.

use crate::classifier::ClassifierError;
use crate::models::ValidationError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can escape the library: configuration, wiring and outcome encoding.
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for SurveyError {
    fn from(error: serde_json::Error) -> Self {
        SurveyError::Serialization(error.to_string())
    }
}

impl From<config::ConfigError> for SurveyError {
    fn from(error: config::ConfigError) -> Self {
        SurveyError::Configuration(error.to_string())
    }
}

impl From<StoreError> for SurveyError {
    fn from(error: StoreError) -> Self {
        SurveyError::Database(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;

/// Why a single envelope was reported back for redelivery.
#[derive(Debug, Error)]
pub enum EnvelopeFailure {
    #[error("malformed payload: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error("incomplete submission: {0}")]
    IncompleteSubmission(#[from] ValidationError),

    #[error("sentiment classification failed: {0}")]
    Classification(#[from] ClassifierError),

    #[error("record persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

impl EnvelopeFailure {
    /// Stable category name used in structured logs
    pub fn category(&self) -> &'static str {
        match self {
            EnvelopeFailure::MalformedInput(_) => "malformed_input",
            EnvelopeFailure::IncompleteSubmission(_) => "incomplete_submission",
            EnvelopeFailure::Classification(_) => "classification_failure",
            EnvelopeFailure::Persistence(_) => "persistence_failure",
        }
    }
}
