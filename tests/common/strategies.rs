//! Proptest strategies for mixed-health batches

#![allow(dead_code)]

use proptest::prelude::*;
use serde_json::json;
use survey_sentiment::MessageEnvelope;

use super::builders::SurveyBodyBuilder;
use super::mock_classifier::CLASSIFIER_FAIL_MARKER;

/// How a generated envelope is expected to behave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Healthy,
    Malformed,
    MissingField,
    ClassifierFails,
    StoreFails,
}

impl EnvelopeKind {
    pub fn should_fail(&self) -> bool {
        !matches!(self, EnvelopeKind::Healthy)
    }
}

pub fn envelope_kind_strategy() -> impl Strategy<Value = EnvelopeKind> {
    prop_oneof![
        4 => Just(EnvelopeKind::Healthy),
        1 => Just(EnvelopeKind::Malformed),
        1 => Just(EnvelopeKind::MissingField),
        1 => Just(EnvelopeKind::ClassifierFails),
        1 => Just(EnvelopeKind::StoreFails),
    ]
}

/// Strategy for required field names
pub fn required_field_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("surveyId"),
        Just("customerId"),
        Just("rating"),
        Just("text"),
    ]
}

pub fn batch_strategy() -> impl Strategy<Value = Vec<(EnvelopeKind, &'static str)>> {
    prop::collection::vec((envelope_kind_strategy(), required_field_strategy()), 0..25)
}

/// Build the envelope for position `index`; store failures are keyed by the returned survey id
pub fn build_envelope(index: usize, kind: EnvelopeKind, missing: &str) -> (MessageEnvelope, String) {
    let envelope_id = format!("msg-{index}");
    let survey_id = format!("survey-{index}");

    let body = match kind {
        EnvelopeKind::Healthy | EnvelopeKind::StoreFails => {
            SurveyBodyBuilder::new(&survey_id).build()
        }
        EnvelopeKind::Malformed => format!("{{\"surveyId\": \"{survey_id}\", "),
        EnvelopeKind::MissingField => SurveyBodyBuilder::new(&survey_id).without(missing).build(),
        EnvelopeKind::ClassifierFails => SurveyBodyBuilder::new(&survey_id)
            .with_field("text", json!(format!("{CLASSIFIER_FAIL_MARKER} broken")))
            .build(),
    };

    (MessageEnvelope::new(envelope_id, body), survey_id)
}
