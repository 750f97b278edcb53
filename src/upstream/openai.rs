use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::debug;

use crate::config::UpstreamSettings;
use crate::provider::Provider;

use super::{ChatBackend, UpstreamError};

/// OpenAI through the typed `async-openai` client.
pub struct OpenAiBackend {
    /// `None` when no API key was configured.
    client: Option<Client<OpenAIConfig>>,
    settings: UpstreamSettings,
}

impl OpenAiBackend {
    pub fn new(settings: UpstreamSettings) -> Self {
        let client = settings.api_key.as_deref().map(|api_key| {
            let config = OpenAIConfig::new()
                .with_api_key(api_key)
                .with_api_base(settings.api_base.trim_end_matches('/'));
            Client::with_config(config)
        });

        Self { client, settings }
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        let client = self
            .client
            .as_ref()
            .ok_or(UpstreamError::MissingCredential {
                env_key: self.settings.provider.spec().env_key,
            })?;

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.settings.model)
            .messages(vec![ChatCompletionRequestMessage::User(message)])
            .build()?;

        debug!(model = %self.settings.model, "Calling OpenAI");
        let response = client.chat().create(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(UpstreamError::EmptyCompletion)
    }

    fn provider(&self) -> Provider {
        self.settings.provider
    }
}
