#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Survey Sentiment
//!
//! Batch consumer for queued customer survey submissions.
//!
//! ## Overview
//!
//! A batch of message envelopes arrives from a queue. Every envelope is parsed,
//! validated, classified by an external sentiment classifier and persisted to a result
//! store with a fixed retention window. The consumer answers with a partial batch
//! failure report naming only the envelopes that must be redelivered; envelopes that
//! succeeded in the same batch are never reprocessed because of a sibling's failure.
//!
//! ## Module Organization
//!
//! - [`consumer`] - Batch processing and failure aggregation
//! - [`messaging`] - Inbound envelope batch and outbound outcome wire types
//! - [`models`] - Submission, sentiment and record types
//! - [`classifier`] - Sentiment classifier capability and HTTP client
//! - [`store`] - Result store capability, PostgreSQL and in-memory stores
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use survey_sentiment::{
//!     BatchConsumer, ConsumerConfig, HttpSentimentClassifier, InMemoryResultStore,
//!     MessageEnvelope,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConsumerConfig::load(None)?;
//! let classifier = HttpSentimentClassifier::new(
//!     config.classifier_endpoint.clone(),
//!     config.language_code.clone(),
//!     config.classifier_timeout(),
//! )?;
//! let consumer = BatchConsumer::new(
//!     Arc::new(classifier),
//!     Arc::new(InMemoryResultStore::new()),
//!     &config,
//! );
//!
//! let outcome = consumer
//!     .process_batch(&[MessageEnvelope::new(
//!         "m-1",
//!         r#"{"surveyId":"s1","customerId":"c1","rating":5,"text":"Great service!"}"#,
//!     )])
//!     .await;
//! println!("{}", outcome.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod consumer;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod models;
pub mod store;
pub mod validation;

pub use classifier::{ClassifierError, HttpSentimentClassifier, SentimentClassifier};
pub use config::ConsumerConfig;
pub use consumer::{BatchConsumer, ProcessedSurvey};
pub use error::{EnvelopeFailure, Result, SurveyError};
pub use messaging::{BatchEvent, BatchItemFailure, BatchOutcome, MessageEnvelope};
pub use models::{
    SentimentLabel, SentimentResult, SentimentScores, SurveyRecord, SurveySubmission,
};
#[cfg(feature = "postgres")]
pub use store::PgResultStore;
pub use store::{InMemoryResultStore, ResultStore, StoreError};
