//! TextRazor adapter — the only module that talks to the external extraction service.
//!
//! The rest of the service sees extraction through the `KeywordExtractor` trait,
//! carried in `AppState` as `Arc<dyn KeywordExtractor>`. Any failure here is
//! recoverable: the orchestrator falls back to local extraction.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

pub mod models;

pub use models::ExtractionResult;
use models::TextRazorEnvelope;

const API_KEY_HEADER: &str = "X-TextRazor-Key";
const EXTRACTORS: &str = "entities,topics,words,phrases";
const CLASSIFIERS: &str = "textrazor_newscodes";

#[derive(Debug, Error)]
pub enum AdapterError {
    /// Missing key, transport failure, non-success status or malformed payload.
    #[error("extraction service unavailable: {0}")]
    Unavailable(String),

    #[error("extraction service timed out")]
    Timeout,
}

impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AdapterError::Timeout
        } else {
            AdapterError::Unavailable(e.to_string())
        }
    }
}

/// Source of structured keyword candidates for a text.
/// Implement this to swap the external service without touching the orchestrator.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<ExtractionResult, AdapterError>;
}

/// HTTP client for the TextRazor analysis endpoint.
/// One request per call, no retry; the client-level timeout bounds the call.
#[derive(Clone)]
pub struct TextRazorClient {
    client: Client,
    api_key: String,
    url: String,
}

impl TextRazorClient {
    pub fn new(api_key: String, url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key,
            url,
        })
    }
}

#[async_trait]
impl KeywordExtractor for TextRazorClient {
    async fn extract(&self, text: &str) -> Result<ExtractionResult, AdapterError> {
        debug!(chars = text.len(), "Calling TextRazor API");

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .form(&[
                ("text", text),
                ("extractors", EXTRACTORS),
                ("classifiers", CLASSIFIERS),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("TextRazor API returned {}: {}", status, body);
            return Err(AdapterError::Unavailable(format!(
                "non-success status {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let envelope: TextRazorEnvelope = serde_json::from_str(&body)
            .map_err(|e| AdapterError::Unavailable(format!("malformed payload: {e}")))?;

        debug!(
            entities = envelope.response.entities.len(),
            topics = envelope.response.topics.len(),
            phrases = envelope.response.phrases.len(),
            "TextRazor API response received"
        );

        Ok(envelope.response)
    }
}

/// Extractor used when no API key is configured. Always unavailable, so every
/// analysis goes straight to the local fallback.
pub struct OfflineExtractor;

#[async_trait]
impl KeywordExtractor for OfflineExtractor {
    async fn extract(&self, _text: &str) -> Result<ExtractionResult, AdapterError> {
        Err(AdapterError::Unavailable(
            "no TEXT_RAZOR_API_KEY configured".to_string(),
        ))
    }
}
