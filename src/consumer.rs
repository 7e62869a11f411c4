//! # Batch Consumer
//!
//! Processes a batch of survey envelopes and reports which ones must be redelivered.
//!
//! Each envelope goes through parse → validate → classify → enrich → persist and ends
//! as a `Result<ProcessedSurvey, EnvelopeFailure>`. The results are folded into a
//! [`BatchOutcome`]; no envelope can abort the processing of another, and a successful
//! envelope never appears in the outcome.
//!
//! Envelopes run with bounded parallelism (`max_concurrency`). Results are collected
//! in batch order from the stream of per-envelope futures, so there is no shared
//! mutable state between workers.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::classifier::{ClassifierError, SentimentClassifier};
use crate::config::ConsumerConfig;
use crate::error::EnvelopeFailure;
use crate::logging::{log_batch_summary, log_envelope_failure, log_envelope_success};
use crate::messaging::{BatchEvent, BatchOutcome, MessageEnvelope};
use crate::models::{RawSurveySubmission, SentimentLabel, SurveyRecord};
use crate::store::{ResultStore, StoreError};

/// Summary of an envelope whose record was persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSurvey {
    pub envelope_id: String,
    pub survey_id: String,
    pub sentiment: SentimentLabel,
    pub expires_at: DateTime<Utc>,
}

pub struct BatchConsumer {
    classifier: Arc<dyn SentimentClassifier>,
    store: Arc<dyn ResultStore>,
    retention: chrono::Duration,
    classifier_timeout: Duration,
    store_timeout: Duration,
    max_concurrency: usize,
    clock: fn() -> DateTime<Utc>,
}

impl std::fmt::Debug for BatchConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchConsumer")
            .field("retention", &self.retention)
            .field("classifier_timeout", &self.classifier_timeout)
            .field("store_timeout", &self.store_timeout)
            .field("max_concurrency", &self.max_concurrency)
            .finish_non_exhaustive()
    }
}

impl BatchConsumer {
    pub fn new(
        classifier: Arc<dyn SentimentClassifier>,
        store: Arc<dyn ResultStore>,
        config: &ConsumerConfig,
    ) -> Self {
        Self {
            classifier,
            store,
            retention: config.retention(),
            classifier_timeout: config.classifier_timeout(),
            store_timeout: config.store_timeout(),
            max_concurrency: config.max_concurrency.max(1),
            clock: Utc::now,
        }
    }

    /// Replace the processing-time source used for `createdAt`
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Process a decoded queue event
    pub async fn handle_event(&self, event: BatchEvent) -> BatchOutcome {
        self.process_batch(&event.records).await
    }

    /// Process every envelope and return the identifiers of those that failed
    #[instrument(skip_all, fields(batch_size = envelopes.len()))]
    pub async fn process_batch(&self, envelopes: &[MessageEnvelope]) -> BatchOutcome {
        let started = Instant::now();

        let results: Vec<(&str, Result<ProcessedSurvey, EnvelopeFailure>)> =
            stream::iter(envelopes)
                .map(|envelope| async move {
                    (
                        envelope.envelope_id.as_str(),
                        self.process_envelope(envelope).await,
                    )
                })
                .buffered(self.max_concurrency)
                .collect()
                .await;

        let outcome = results
            .into_iter()
            .fold(BatchOutcome::success(), |mut outcome, (envelope_id, result)| {
                match result {
                    Ok(processed) => log_envelope_success(
                        envelope_id,
                        &processed.survey_id,
                        processed.sentiment.as_str(),
                    ),
                    Err(failure) => {
                        log_envelope_failure(envelope_id, failure.category(), &failure);
                        outcome.record_failure(envelope_id);
                    }
                }
                outcome
            });

        log_batch_summary(
            envelopes.len(),
            outcome.len(),
            started.elapsed().as_millis() as u64,
        );
        outcome
    }

    /// Run one envelope through parse, validate, classify, enrich and persist
    #[instrument(skip_all, fields(envelope_id = %envelope.envelope_id))]
    pub async fn process_envelope(
        &self,
        envelope: &MessageEnvelope,
    ) -> Result<ProcessedSurvey, EnvelopeFailure> {
        let submission = RawSurveySubmission::from_body(&envelope.body)
            .map_err(EnvelopeFailure::MalformedInput)?
            .validate()?;

        debug!(survey_id = %submission.survey_id, "classifying survey text");

        let sentiment = tokio::time::timeout(
            self.classifier_timeout,
            self.classifier.classify(&submission.text),
        )
        .await
        .map_err(|_| ClassifierError::timeout(self.classifier_timeout.as_millis() as u64))??;

        let record = SurveyRecord::enrich(submission, sentiment, (self.clock)(), self.retention);

        tokio::time::timeout(self.store_timeout, self.store.put(&record))
            .await
            .map_err(|_| StoreError::timeout("put", self.store_timeout.as_millis() as u64))??;

        Ok(ProcessedSurvey {
            envelope_id: envelope.envelope_id.clone(),
            survey_id: record.survey_id,
            sentiment: record.sentiment_label,
            expires_at: record.expires_at,
        })
    }
}
