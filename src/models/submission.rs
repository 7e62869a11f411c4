use serde::{Deserialize, Serialize};
use std::fmt;

/// Survey submission exactly as it arrives in an envelope body.
///
/// Every field is optional at this stage so that a structurally valid document with
/// missing values is reported as an incomplete submission rather than a parse error.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSurveySubmission {
    pub survey_id: Option<String>,
    pub customer_id: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub timestamp: Option<String>,
}

/// A submission that passed validation and may be classified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    pub survey_id: String,
    pub customer_id: String,
    pub rating: f64,
    pub text: String,
    /// Caller-supplied and advisory only; never used for ordering or expiry
    pub timestamp: Option<String>,
}

/// Required fields that were absent, null or empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl ValidationError {
    pub fn missing(missing: Vec<&'static str>) -> Self {
        Self { missing }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required fields: {}", self.missing.join(", "))
    }
}

impl std::error::Error for ValidationError {}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Text must carry something to classify
fn present_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RawSurveySubmission {
    /// Parse an envelope body
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Check all required fields at once and produce a typed submission.
    ///
    /// Every missing field is reported, not just the first one.
    pub fn validate(self) -> Result<SurveySubmission, ValidationError> {
        let survey_id = present(self.survey_id);
        let customer_id = present(self.customer_id);
        let text = present_text(self.text);

        let mut missing = Vec::new();
        if survey_id.is_none() {
            missing.push("surveyId");
        }
        if customer_id.is_none() {
            missing.push("customerId");
        }
        if self.rating.is_none() {
            missing.push("rating");
        }
        if text.is_none() {
            missing.push("text");
        }

        match (survey_id, customer_id, self.rating, text) {
            (Some(survey_id), Some(customer_id), Some(rating), Some(text)) => {
                Ok(SurveySubmission {
                    survey_id,
                    customer_id,
                    rating,
                    text,
                    timestamp: present(self.timestamp),
                })
            }
            _ => Err(ValidationError::missing(missing)),
        }
    }
}
