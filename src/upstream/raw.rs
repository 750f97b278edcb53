use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::UpstreamSettings;

use super::UpstreamError;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Plain HTTP chat-completion client shared by the raw JSON variants.
pub(super) struct RawChatClient {
    client: reqwest::Client,
    settings: UpstreamSettings,
}

impl RawChatClient {
    pub(super) fn new(settings: UpstreamSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    pub(super) fn settings(&self) -> &UpstreamSettings {
        &self.settings
    }

    /// Posts `prompt` and parses the body as JSON whatever the status code;
    /// providers report errors in the body and callers decide what that means.
    pub(super) async fn post(&self, prompt: &str) -> Result<Value, UpstreamError> {
        let spec = self.settings.provider.spec();
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingCredential {
                env_key: spec.env_key,
            })?;

        let payload = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let url = self.settings.completions_url();
        debug!(provider = spec.display_name, model = %self.settings.model, %url, "Calling upstream");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(provider = spec.display_name, %status, bytes = body.len(), "Upstream replied");

        Ok(serde_json::from_str(&body)?)
    }
}
