//! PostgreSQL-backed result store.
//!
//! The table name comes from configuration and is validated as an identifier before it
//! is interpolated into any statement. All values are bound parameters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::Row;
use tracing::{debug, info, instrument};

use super::{ResultStore, StoreError};
use crate::error::{Result, SurveyError};
use crate::models::{partition_key, SentimentLabel, SentimentScores, SurveyRecord};
use crate::validation::validate_table_name;

const SELECT_COLUMNS: &str = "pk, survey_id, customer_id, rating, text, original_timestamp, \
     sentiment_label, sentiment_scores, created_at, expires_at";

#[derive(Debug, Clone)]
pub struct PgResultStore {
    pool: PgPool,
    table_name: String,
}

impl PgResultStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool, table_name: impl Into<String>) -> Result<Self> {
        let table_name = table_name.into();
        validate_table_name(&table_name)?;
        Ok(Self { pool, table_name })
    }

    /// Open a dedicated pool
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        table_name: impl Into<String>,
    ) -> Result<Self> {
        let table_name = table_name.into();
        validate_table_name(&table_name)?;

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| SurveyError::Database(format!("Failed to connect: {e}")))?;

        info!(table = %table_name, max_connections, "Connected result store");
        Ok(Self { pool, table_name })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Create the results table and its expiry index if they do not exist
    pub async fn ensure_schema(&self) -> std::result::Result<(), StoreError> {
        let table = &self.table_name;
        let index_base = table.rsplit('.').next().unwrap_or(table);

        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                pk TEXT PRIMARY KEY,
                survey_id TEXT NOT NULL,
                customer_id TEXT NOT NULL,
                rating DOUBLE PRECISION NOT NULL,
                text TEXT NOT NULL,
                original_timestamp TEXT,
                sentiment_label TEXT NOT NULL,
                sentiment_scores JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                expires_at TIMESTAMPTZ NOT NULL
            )"
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS {index_base}_expires_at_idx ON {table} (expires_at)"
        ))
        .execute(&self.pool)
        .await?;

        debug!(table = %table, "Result store schema ready");
        Ok(())
    }
}

fn record_from_row(row: &PgRow) -> std::result::Result<SurveyRecord, StoreError> {
    let label: String = row.try_get("sentiment_label")?;
    let sentiment_label = label
        .parse::<SentimentLabel>()
        .map_err(StoreError::serialization)?;
    let Json(sentiment_scores): Json<SentimentScores> = row.try_get("sentiment_scores")?;

    Ok(SurveyRecord {
        pk: row.try_get("pk")?,
        survey_id: row.try_get("survey_id")?,
        customer_id: row.try_get("customer_id")?,
        rating: row.try_get("rating")?,
        text: row.try_get("text")?,
        original_timestamp: row.try_get("original_timestamp")?,
        sentiment_label,
        sentiment_scores,
        created_at: row.try_get("created_at")?,
        expires_at: row.try_get("expires_at")?,
    })
}

#[async_trait]
impl ResultStore for PgResultStore {
    #[instrument(skip(self, record), fields(pk = %record.pk))]
    async fn put(&self, record: &SurveyRecord) -> std::result::Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {} ({SELECT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (pk) DO UPDATE SET
                survey_id = EXCLUDED.survey_id,
                customer_id = EXCLUDED.customer_id,
                rating = EXCLUDED.rating,
                text = EXCLUDED.text,
                original_timestamp = EXCLUDED.original_timestamp,
                sentiment_label = EXCLUDED.sentiment_label,
                sentiment_scores = EXCLUDED.sentiment_scores,
                created_at = EXCLUDED.created_at,
                expires_at = EXCLUDED.expires_at",
            self.table_name
        );

        sqlx::query(&sql)
            .bind(&record.pk)
            .bind(&record.survey_id)
            .bind(&record.customer_id)
            .bind(record.rating)
            .bind(&record.text)
            .bind(&record.original_timestamp)
            .bind(record.sentiment_label.as_str())
            .bind(Json(&record.sentiment_scores))
            .bind(record.created_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get(&self, survey_id: &str) -> std::result::Result<Option<SurveyRecord>, StoreError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM {} WHERE pk = $1",
            self.table_name
        );

        let row = sqlx::query(&sql)
            .bind(partition_key(survey_id))
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> std::result::Result<u64, StoreError> {
        let sql = format!("DELETE FROM {} WHERE expires_at <= $1", self.table_name);

        let result = sqlx::query(&sql).bind(now).execute(&self.pool).await?;
        let purged = result.rows_affected();

        info!(table = %self.table_name, purged, "Purged expired survey records");
        Ok(purged)
    }
}
