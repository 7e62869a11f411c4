//! HTTP client for a detect-sentiment style classification service.
//!
//! Request: `POST {endpoint}` with `{"Text": "...", "LanguageCode": "en"}`.
//! Response: `{"Sentiment": "POSITIVE", "SentimentScore": {"Positive": 0.98, ...}}`.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use super::{ClassifierError, SentimentClassifier};
use crate::models::{SentimentLabel, SentimentResult, SentimentScores};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DetectSentimentRequest<'a> {
    text: &'a str,
    language_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetectSentimentResponse {
    sentiment: String,
    sentiment_score: SentimentScores,
}

/// Reusable classifier client; the underlying connection pool is shared by all calls
#[derive(Debug, Clone)]
pub struct HttpSentimentClassifier {
    client: reqwest::Client,
    endpoint: String,
    language_code: String,
    request_timeout: Duration,
}

impl HttpSentimentClassifier {
    pub fn new(
        endpoint: impl Into<String>,
        language_code: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ClassifierError::service(None, format!("Failed to build client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            language_code: language_code.into(),
            request_timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    fn transport_error(&self, err: reqwest::Error) -> ClassifierError {
        if err.is_timeout() {
            ClassifierError::timeout(self.request_timeout.as_millis() as u64)
        } else {
            ClassifierError::from(err)
        }
    }
}

fn decode_response(body: &[u8]) -> Result<SentimentResult, ClassifierError> {
    let response: DetectSentimentResponse = serde_json::from_slice(body)
        .map_err(|e| ClassifierError::malformed_response(e.to_string()))?;
    let label = response
        .sentiment
        .parse::<SentimentLabel>()
        .map_err(ClassifierError::malformed_response)?;
    Ok(SentimentResult::new(label, response.sentiment_score))
}

#[async_trait]
impl SentimentClassifier for HttpSentimentClassifier {
    #[instrument(skip(self, text), fields(endpoint = %self.endpoint, text_len = text.len()))]
    async fn classify(&self, text: &str) -> Result<SentimentResult, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::invalid_input("text must not be empty"));
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&DetectSentimentRequest {
                text,
                language_code: &self.language_code,
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        match status {
            s if s.is_success() => {
                let result = decode_response(&body)?;
                debug!(label = %result.label, confidence = result.confidence(), "classified text");
                Ok(result)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Err(
                ClassifierError::invalid_input(String::from_utf8_lossy(&body).into_owned()),
            ),
            s => Err(ClassifierError::service(
                Some(s.as_u16()),
                String::from_utf8_lossy(&body).into_owned(),
            )),
        }
    }
}
