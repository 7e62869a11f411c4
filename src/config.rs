//! # Consumer Configuration
//!
//! Layered configuration: built-in defaults, then an optional file (TOML, YAML or JSON,
//! chosen by extension), then `SURVEY_*` environment variables.
//!
//! ```bash
//! export SURVEY_TABLE_NAME=survey_results
//! export SURVEY_TTL_DAYS=365            # alias of SURVEY_RETENTION_DAYS
//! export SURVEY_LANGUAGE_CODE=en
//! export SURVEY_MAX_CONCURRENCY=10
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, SurveyError};
use crate::validation::{validate_language_code, validate_table_name};

pub const ENV_PREFIX: &str = "SURVEY";

/// Upper bound on record retention (100 years)
pub const MAX_RETENTION_DAYS: u32 = 36_500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerConfig {
    /// Store destination (table name)
    pub table_name: String,
    /// Record retention applied to every write
    #[serde(alias = "ttl_days")]
    pub retention_days: u32,
    /// Language passed to the classifier
    pub language_code: String,
    /// Envelopes processed at once within a batch; 1 means sequential
    pub max_concurrency: usize,
    pub classifier_timeout_ms: u64,
    pub store_timeout_ms: u64,
    pub classifier_endpoint: String,
    pub database_url: String,
    pub database_max_connections: u32,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            table_name: "survey_results".to_string(),
            retention_days: 365,
            language_code: "en".to_string(),
            max_concurrency: 10,
            classifier_timeout_ms: 5000,
            store_timeout_ms: 5000,
            classifier_endpoint: "http://localhost:8080/detect-sentiment".to_string(),
            database_url: "postgresql://localhost/survey_sentiment_development".to_string(),
            database_max_connections: 5,
        }
    }
}

impl ConsumerConfig {
    /// Load from an optional file plus `SURVEY_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Same as [`ConsumerConfig::load`] with a custom environment prefix
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(SurveyError::Configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(config::Environment::with_prefix(env_prefix).try_parsing(true));

        let config: ConsumerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            table_name = %config.table_name,
            retention_days = config.retention_days,
            language_code = %config.language_code,
            max_concurrency = config.max_concurrency,
            "Consumer configuration loaded"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_table_name(&self.table_name)?;
        validate_language_code(&self.language_code)?;

        if self.retention_days == 0 {
            return Err(SurveyError::Configuration(
                "retention_days must be positive".to_string(),
            ));
        }
        if self.retention_days > MAX_RETENTION_DAYS {
            return Err(SurveyError::Configuration(format!(
                "retention_days must be at most {MAX_RETENTION_DAYS}"
            )));
        }
        if self.max_concurrency == 0 {
            return Err(SurveyError::Configuration(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.classifier_timeout_ms == 0 || self.store_timeout_ms == 0 {
            return Err(SurveyError::Configuration(
                "call timeouts must be positive".to_string(),
            ));
        }
        if self.database_max_connections == 0 {
            return Err(SurveyError::Configuration(
                "database_max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.retention_days))
    }

    pub fn classifier_timeout(&self) -> Duration {
        Duration::from_millis(self.classifier_timeout_ms)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
