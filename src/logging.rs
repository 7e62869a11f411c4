//! # Structured Logging Module
//!
//! Environment-aware structured logging on stderr (stdout is reserved for the batch
//! outcome written by the runtime adapter).
//!
//! - `RUST_LOG` wins when set; otherwise the level follows `SURVEY_ENV`/`APP_ENV`
//! - `LOG_FORMAT=json` switches to one JSON object per line

use chrono::Utc;
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));

        let layer = if use_json_format() {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_ansi(std::io::stderr().is_terminal())
                .with_filter(filter)
                .boxed()
        };

        // Another subscriber may already be installed (tests, embedding runtimes)
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %environment,
            "Structured logging initialized"
        );
    });
}

fn use_json_format() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("SURVEY_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "test" => "debug".to_string(),
        "development" => "debug".to_string(),
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log an envelope that will be reported for redelivery
pub fn log_envelope_failure(envelope_id: &str, category: &str, error: &dyn std::error::Error) {
    tracing::error!(
        envelope_id = %envelope_id,
        category = %category,
        error = %error,
        timestamp = %Utc::now().to_rfc3339(),
        "Envelope failed"
    );
}

/// Log a persisted survey
pub fn log_envelope_success(envelope_id: &str, survey_id: &str, sentiment: &str) {
    tracing::info!(
        envelope_id = %envelope_id,
        survey_id = %survey_id,
        sentiment = %sentiment,
        "Processed survey"
    );
}

/// Log the result of one batch invocation
pub fn log_batch_summary(batch_size: usize, failed: usize, duration_ms: u64) {
    if failed == 0 {
        tracing::info!(batch_size, failed, duration_ms, "Batch processed");
    } else {
        tracing::warn!(
            batch_size,
            failed,
            succeeded = batch_size.saturating_sub(failed),
            duration_ms,
            "Batch processed with failures"
        );
    }
}
