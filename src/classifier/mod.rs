//! # Sentiment Classifier
//!
//! The classifier is an external capability: given a text it returns a label and a
//! confidence vector, or fails. The consumer only depends on the [`SentimentClassifier`]
//! trait; [`HttpSentimentClassifier`] talks to a detect-sentiment style HTTP endpoint.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::SentimentResult;

pub use http::HttpSentimentClassifier;

/// Classifier failure kinds
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Classifier timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Classifier service error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Service {
        status: Option<u16>,
        message: String,
    },

    #[error("Classifier rejected input: {reason}")]
    InvalidInput { reason: String },

    #[error("Malformed classifier response: {message}")]
    MalformedResponse { message: String },
}

impl ClassifierError {
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    pub fn service(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ClassifierError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClassifierError::malformed_response(err.to_string())
        } else {
            ClassifierError::service(err.status().map(|s| s.as_u16()), err.to_string())
        }
    }
}

/// Long-lived, shareable sentiment classification capability.
///
/// Implementations must not keep per-request mutable state: one instance serves every
/// envelope of every batch, possibly concurrently.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<SentimentResult, ClassifierError>;
}
