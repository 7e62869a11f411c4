//! Configuration Loading Tests
//!
//! Layering of defaults, files and environment variables. Each test uses its own
//! environment prefix so tests can run in parallel.

use std::io::Write;
use std::time::Duration;
use survey_sentiment::config::MAX_RETENTION_DAYS;
use survey_sentiment::{ConsumerConfig, SurveyError};

fn toml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn config_has_expected_defaults() {
    let config = ConsumerConfig::default();

    assert_eq!(config.table_name, "survey_results");
    assert_eq!(config.retention_days, 365);
    assert_eq!(config.language_code, "en");
    assert_eq!(config.max_concurrency, 10);
    assert_eq!(config.classifier_timeout(), Duration::from_millis(5000));
    assert_eq!(config.store_timeout(), Duration::from_millis(5000));
}

#[test]
fn config_file_overrides_defaults() {
    let file = toml_file(
        r#"
table_name = "analytics.survey_results"
retention_days = 30
language_code = "de"
max_concurrency = 1
"#,
    );

    let config =
        ConsumerConfig::load_with_prefix(Some(file.path()), "SURVEYCFG_FILE_ONLY").unwrap();

    assert_eq!(config.table_name, "analytics.survey_results");
    assert_eq!(config.retention(), chrono::Duration::days(30));
    assert_eq!(config.language_code, "de");
    assert_eq!(config.max_concurrency, 1);
    assert_eq!(config.store_timeout_ms, 5000);
}

#[test]
fn environment_overrides_file() {
    let file = toml_file("retention_days = 30\nmax_concurrency = 2\n");
    std::env::set_var("SURVEYCFG_ENV_WINS_MAX_CONCURRENCY", "25");
    std::env::set_var("SURVEYCFG_ENV_WINS_TABLE_NAME", "survey_results_staging");

    let config =
        ConsumerConfig::load_with_prefix(Some(file.path()), "SURVEYCFG_ENV_WINS").unwrap();

    assert_eq!(config.max_concurrency, 25);
    assert_eq!(config.table_name, "survey_results_staging");
    assert_eq!(config.retention_days, 30);
}

#[test]
fn ttl_days_is_accepted_for_retention() {
    std::env::set_var("SURVEYCFG_TTL_ALIAS_TTL_DAYS", "90");

    let config = ConsumerConfig::load_with_prefix(None, "SURVEYCFG_TTL_ALIAS").unwrap();

    assert_eq!(config.retention_days, 90);
    assert_eq!(config.retention(), chrono::Duration::days(90));
}

#[test]
fn invalid_values_are_rejected() {
    std::env::set_var("SURVEYCFG_INVALID_TABLE_NAME", "results; DROP TABLE x");
    let result = ConsumerConfig::load_with_prefix(None, "SURVEYCFG_INVALID");
    assert!(matches!(result, Err(SurveyError::Configuration(_))));

    let file = toml_file("max_concurrency = 0\n");
    let result = ConsumerConfig::load_with_prefix(Some(file.path()), "SURVEYCFG_INVALID_FILE");
    assert!(result.is_err());
}

#[test]
fn malformed_file_is_an_error() {
    let file = toml_file("retention_days = \"a year\"\n");
    let result = ConsumerConfig::load_with_prefix(Some(file.path()), "SURVEYCFG_MALFORMED");
    assert!(matches!(result, Err(SurveyError::Configuration(_))));
}

#[test]
fn retention_is_capped() {
    let file = toml_file(&format!("retention_days = {}\n", MAX_RETENTION_DAYS + 1));
    let result = ConsumerConfig::load_with_prefix(Some(file.path()), "SURVEYCFG_RETENTION_CAP");
    assert!(matches!(result, Err(SurveyError::Configuration(_))));

    let file = toml_file("retention_days = 200000000\n");
    let result = ConsumerConfig::load_with_prefix(Some(file.path()), "SURVEYCFG_RETENTION_CAP");
    assert!(result.is_err());

    let file = toml_file(&format!("retention_days = {MAX_RETENTION_DAYS}\n"));
    let config =
        ConsumerConfig::load_with_prefix(Some(file.path()), "SURVEYCFG_RETENTION_CAP").unwrap();
    assert_eq!(config.retention_days, MAX_RETENTION_DAYS);
}
