//! Result store wrapper with injectable write failures

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use survey_sentiment::{InMemoryResultStore, ResultStore, StoreError, SurveyRecord};

/// In-memory store that rejects writes for selected surveys
#[derive(Default)]
pub struct FlakyStore {
    inner: InMemoryResultStore,
    failing_surveys: RwLock<HashSet<String>>,
    put_delay: Option<Duration>,
    put_attempts: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_put_delay(mut self, delay: Duration) -> Self {
        self.put_delay = Some(delay);
        self
    }

    pub fn fail_survey(&self, survey_id: &str) {
        self.failing_surveys.write().insert(survey_id.to_string());
    }

    pub fn recover_survey(&self, survey_id: &str) {
        self.failing_surveys.write().remove(survey_id);
    }

    pub fn records(&self) -> &InMemoryResultStore {
        &self.inner
    }

    pub fn put_attempts(&self) -> usize {
        self.put_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResultStore for FlakyStore {
    async fn put(&self, record: &SurveyRecord) -> Result<(), StoreError> {
        self.put_attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.put_delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_surveys.read().contains(&record.survey_id) {
            return Err(StoreError::capacity_exceeded(
                "ProvisionedThroughputExceededException",
            ));
        }
        self.inner.put(record).await
    }

    async fn get(&self, survey_id: &str) -> Result<Option<SurveyRecord>, StoreError> {
        self.inner.get(survey_id).await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        self.inner.purge_expired(now).await
    }
}
