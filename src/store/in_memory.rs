use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use super::{ResultStore, StoreError};
use crate::models::{partition_key, SurveyRecord};

/// Process-local store keyed by partition key.
///
/// Cloning shares the underlying map, so a clone handed to the consumer and one kept
/// by a test observe the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultStore {
    records: Arc<DashMap<String, SurveyRecord>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn snapshot(&self) -> Vec<SurveyRecord> {
        self.records.iter().map(|e| e.value().clone()).collect()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn put(&self, record: &SurveyRecord) -> Result<(), StoreError> {
        self.records.insert(record.pk.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, survey_id: &str) -> Result<Option<SurveyRecord>, StoreError> {
        Ok(self
            .records
            .get(&partition_key(survey_id))
            .map(|e| e.value().clone()))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut purged = 0u64;
        self.records.retain(|_, record| {
            let expired = record.is_expired(now);
            if expired {
                purged += 1;
            }
            !expired
        });
        Ok(purged)
    }
}
