//! # Result Store
//!
//! Durable persistence of enriched survey records, keyed by the survey partition key
//! with overwrite semantics. Physical removal of expired records is the store's job
//! (`purge_expired`), not the consumer's.

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::SurveyRecord;

pub use in_memory::InMemoryResultStore;
#[cfg(feature = "postgres")]
pub use postgres::PgResultStore;

/// Store failure kinds
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store operation {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Store database error: {operation}: {message}")]
    Database { operation: String, message: String },

    #[error("Store capacity exceeded: {message}")]
    CapacityExceeded { message: String },

    #[error("Store serialization error: {message}")]
    Serialization { message: String },
}

impl StoreError {
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    pub fn database(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Database {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn capacity_exceeded(message: impl Into<String>) -> Self {
        Self::CapacityExceeded {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StoreError::timeout("database_pool", 30_000),
            sqlx::Error::PoolClosed => StoreError::database("pool", "Database pool is closed"),
            sqlx::Error::Database(db_err) => StoreError::database("query", db_err.to_string()),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::serialization(err.to_string())
            }
            _ => StoreError::database("connection", err.to_string()),
        }
    }
}

/// Long-lived, shareable record persistence capability
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Write a record; an existing record with the same partition key is replaced
    async fn put(&self, record: &SurveyRecord) -> Result<(), StoreError>;

    /// Fetch the record for a survey, if any
    async fn get(&self, survey_id: &str) -> Result<Option<SurveyRecord>, StoreError>;

    /// Remove records whose expiry watermark is at or before `now`
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;
}
