use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::sentiment::{SentimentLabel, SentimentResult, SentimentScores};
use super::submission::SurveySubmission;

/// Namespace prefix of every survey partition key
pub const PARTITION_KEY_PREFIX: &str = "SURVEY#";

/// Store identity for a survey. Reprocessing the same survey yields the same key.
pub fn partition_key(survey_id: &str) -> String {
    format!("{PARTITION_KEY_PREFIX}{survey_id}")
}

/// Enriched survey as persisted in the result store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    pub pk: String,
    pub survey_id: String,
    pub customer_id: String,
    pub rating: f64,
    pub text: String,
    pub original_timestamp: Option<String>,
    pub sentiment_label: SentimentLabel,
    pub sentiment_scores: SentimentScores,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SurveyRecord {
    /// Build a record from a validated submission and its classification.
    ///
    /// `processed_at` is truncated to whole seconds so the record survives a store
    /// round trip unchanged; `expires_at` is exactly `created_at + retention`, clamped
    /// to the latest representable instant.
    pub fn enrich(
        submission: SurveySubmission,
        sentiment: SentimentResult,
        processed_at: DateTime<Utc>,
        retention: Duration,
    ) -> Self {
        let created_at = processed_at.trunc_subsecs(0);
        let expires_at = created_at
            .checked_add_signed(retention)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            pk: partition_key(&submission.survey_id),
            survey_id: submission.survey_id,
            customer_id: submission.customer_id,
            rating: submission.rating,
            text: submission.text,
            original_timestamp: submission.timestamp,
            sentiment_label: sentiment.label,
            sentiment_scores: sentiment.scores,
            created_at,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
