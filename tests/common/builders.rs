//! Envelope and survey body builders

#![allow(dead_code)]

use serde_json::{json, Map, Value};
use survey_sentiment::MessageEnvelope;

/// Builder for survey submission bodies; fields can be dropped or overridden
pub struct SurveyBodyBuilder {
    fields: Map<String, Value>,
}

impl SurveyBodyBuilder {
    pub fn new(survey_id: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("surveyId".to_string(), json!(survey_id));
        fields.insert("customerId".to_string(), json!(format!("customer-{survey_id}")));
        fields.insert("rating".to_string(), json!(4));
        fields.insert("text".to_string(), json!("Great value for money."));
        fields.insert("timestamp".to_string(), json!("2024-01-01T00:00:00Z"));
        Self { fields }
    }

    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_field("text", json!(text))
    }

    pub fn with_rating(self, rating: i64) -> Self {
        self.with_field("rating", json!(rating))
    }

    pub fn without(mut self, name: &str) -> Self {
        self.fields.remove(name);
        self
    }

    pub fn build(self) -> String {
        Value::Object(self.fields).to_string()
    }

    pub fn into_envelope(self, envelope_id: &str) -> MessageEnvelope {
        MessageEnvelope::new(envelope_id, self.build())
    }
}

/// Envelope carrying a complete, healthy survey
pub fn healthy_envelope(envelope_id: &str, survey_id: &str) -> MessageEnvelope {
    SurveyBodyBuilder::new(survey_id).into_envelope(envelope_id)
}

/// Unique-enough identifier for test data
pub fn unique_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
