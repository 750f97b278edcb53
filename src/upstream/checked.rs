use async_trait::async_trait;
use serde_json::Value;

use crate::config::UpstreamSettings;
use crate::provider::Provider;

use super::raw::RawChatClient;
use super::{ChatBackend, UpstreamError};

/// Raw JSON backend that checks the response shape before reading it.
pub struct CheckedBackend {
    raw: RawChatClient,
}

impl CheckedBackend {
    pub fn new(settings: UpstreamSettings) -> Self {
        Self {
            raw: RawChatClient::new(settings),
        }
    }
}

#[async_trait]
impl ChatBackend for CheckedBackend {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        let payload = self.raw.post(prompt).await?;
        extract_checked(self.provider().display_name(), &payload)
    }

    fn provider(&self) -> Provider {
        self.raw.settings().provider
    }
}

/// Reads `choices[0].message.content`, or reports the whole payload as an
/// [`UpstreamError::UnexpectedShape`] tagged with `provider`.
pub fn extract_checked(provider: &'static str, payload: &Value) -> Result<String, UpstreamError> {
    payload
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| UpstreamError::UnexpectedShape {
            provider,
            payload: payload.to_string(),
        })
}
