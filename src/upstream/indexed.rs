use async_trait::async_trait;
use serde_json::Value;

use crate::config::UpstreamSettings;
use crate::provider::Provider;

use super::raw::RawChatClient;
use super::{ChatBackend, UpstreamError};

/// Raw JSON backend that indexes straight into the response.
pub struct IndexedBackend {
    raw: RawChatClient,
}

impl IndexedBackend {
    pub fn new(settings: UpstreamSettings) -> Self {
        Self {
            raw: RawChatClient::new(settings),
        }
    }
}

#[async_trait]
impl ChatBackend for IndexedBackend {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        let payload = self.raw.post(prompt).await?;
        extract_indexed(&payload)
    }

    fn provider(&self) -> Provider {
        self.raw.settings().provider
    }
}

/// Walks `choices[0].message.content`, failing on the first absent step.
pub fn extract_indexed(payload: &Value) -> Result<String, UpstreamError> {
    let choices = payload
        .get("choices")
        .ok_or(UpstreamError::MissingField("choices"))?;
    let first = choices
        .get(0)
        .ok_or(UpstreamError::MissingField("choices[0]"))?;
    let message = first
        .get("message")
        .ok_or(UpstreamError::MissingField("message"))?;
    let content = message
        .get("content")
        .ok_or(UpstreamError::MissingField("content"))?;

    content
        .as_str()
        .map(str::to_owned)
        .ok_or(UpstreamError::EmptyCompletion)
}
