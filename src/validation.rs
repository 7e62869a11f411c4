//! Input validation for configuration values
//!
//! The store table name is interpolated into SQL, so it is restricted to a plain
//! identifier (optionally schema-qualified) before any statement is built.

use crate::error::{Result, SurveyError};

/// Maximum identifier length accepted by PostgreSQL
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Validates a table name, allowing a single `schema.table` qualification
pub fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SurveyError::Configuration(
            "Table name must not be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 {
        return Err(SurveyError::Configuration(format!(
            "Table name has too many qualifiers: {name}"
        )));
    }

    for part in parts {
        validate_identifier(part)?;
    }

    Ok(())
}

fn validate_identifier(ident: &str) -> Result<()> {
    if ident.is_empty() || ident.len() > MAX_IDENTIFIER_LENGTH {
        return Err(SurveyError::Configuration(format!(
            "Identifier length must be 1-{MAX_IDENTIFIER_LENGTH} characters: {ident:?}"
        )));
    }

    let mut chars = ident.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SurveyError::Configuration(format!(
            "Invalid identifier: {ident:?} (expected [A-Za-z_][A-Za-z0-9_]*)"
        )));
    }

    Ok(())
}

/// Validates a classifier language code such as `en`, `pt` or `zh-TW`
pub fn validate_language_code(code: &str) -> Result<()> {
    let valid = (2..=5).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
        && !code.starts_with('-')
        && !code.ends_with('-');

    if valid {
        Ok(())
    } else {
        Err(SurveyError::Configuration(format!(
            "Invalid language code: {code:?}"
        )))
    }
}
