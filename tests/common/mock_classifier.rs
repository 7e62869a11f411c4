//! Scriptable classifier for consumer tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;
use survey_sentiment::{
    ClassifierError, SentimentClassifier, SentimentLabel, SentimentResult, SentimentScores,
};

/// Texts containing this marker make the classifier fail
pub const CLASSIFIER_FAIL_MARKER: &str = "[classifier-fail]";

/// Classifier returning a fixed label, failing on marked texts, and recording every call
pub struct MockClassifier {
    label: SentimentLabel,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockClassifier {
    pub fn new(label: SentimentLabel) -> Self {
        Self {
            label,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn positive() -> Self {
        Self::new(SentimentLabel::Positive)
    }

    /// Simulate a slow classification service
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn classified_texts(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn scores_for(label: SentimentLabel) -> SentimentScores {
        let mut scores = SentimentScores {
            positive: 0.01,
            negative: 0.005,
            neutral: 0.003,
            mixed: 0.002,
        };
        match label {
            SentimentLabel::Positive => scores.positive = 0.98,
            SentimentLabel::Negative => scores.negative = 0.98,
            SentimentLabel::Neutral => scores.neutral = 0.98,
            SentimentLabel::Mixed => scores.mixed = 0.98,
        }
        scores
    }
}

#[async_trait]
impl SentimentClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentResult, ClassifierError> {
        self.calls.lock().push(text.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if text.contains(CLASSIFIER_FAIL_MARKER) {
            return Err(ClassifierError::service(
                Some(503),
                "ServiceUnavailableException",
            ));
        }

        Ok(SentimentResult::new(self.label, Self::scores_for(self.label)))
    }
}
