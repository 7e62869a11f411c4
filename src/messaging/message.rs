//! # Batch Message Structures
//!
//! Inbound envelopes arrive in the queue event shape
//! `{"Records": [{"messageId": "...", "body": "..."}]}` and the consumer answers with
//! `{"batchItemFailures": [{"itemIdentifier": "..."}]}`.

use serde::{Deserialize, Serialize};

/// One unit of queued work.
///
/// `envelope_id` is the delivery identifier used only to report failures back to the
/// queue; it carries no business meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    #[serde(rename = "messageId")]
    pub envelope_id: String,
    pub body: String,
}

impl MessageEnvelope {
    pub fn new(envelope_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            envelope_id: envelope_id.into(),
            body: body.into(),
        }
    }
}

/// A group of envelopes delivered in one invocation.
/// Extra per-record attributes sent by the queue are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<MessageEnvelope>,
}

impl BatchEvent {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn into_envelopes(self) -> Vec<MessageEnvelope> {
        self.records
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchItemFailure {
    #[serde(rename = "itemIdentifier")]
    pub item_identifier: String,
}

/// Partial batch failure report.
///
/// Every envelope that failed appears exactly once; an empty list means the whole batch
/// was processed and nothing should be redelivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    #[serde(rename = "batchItemFailures", default)]
    pub batch_item_failures: Vec<BatchItemFailure>,
}

impl BatchOutcome {
    pub fn success() -> Self {
        Self::default()
    }

    /// Record a failed envelope. Duplicate identifiers are collapsed.
    pub fn record_failure(&mut self, envelope_id: impl Into<String>) {
        let item_identifier = envelope_id.into();
        if !self
            .batch_item_failures
            .iter()
            .any(|f| f.item_identifier == item_identifier)
        {
            self.batch_item_failures
                .push(BatchItemFailure { item_identifier });
        }
    }

    pub fn is_success(&self) -> bool {
        self.batch_item_failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.batch_item_failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch_item_failures.is_empty()
    }

    pub fn failed_ids(&self) -> impl Iterator<Item = &str> {
        self.batch_item_failures
            .iter()
            .map(|f| f.item_identifier.as_str())
    }

    pub fn contains(&self, envelope_id: &str) -> bool {
        self.failed_ids().any(|id| id == envelope_id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
