//! Upstream chat-completion backends.
//!
//! Every provider variant implements [`ChatBackend`]: send one user prompt,
//! get back the completion text or an [`UpstreamError`]. How the text is
//! pulled out of the response differs per variant and is kept separate:
//!
//! - [`OpenAiBackend`] goes through the typed `async-openai` client
//! - [`CheckedBackend`] posts raw JSON and validates the shape
//! - [`IndexedBackend`] posts raw JSON and indexes it blindly

mod checked;
mod indexed;
mod openai;
mod raw;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::UpstreamSettings;
use crate::provider::{Extraction, Provider};

pub use checked::{extract_checked, CheckedBackend};
pub use indexed::{extract_indexed, IndexedBackend};
pub use openai::OpenAiBackend;

/// One best-effort round trip to a chat-completion API.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send `prompt` as the sole user message and return the completion text.
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError>;

    /// The variant this backend talks to.
    fn provider(&self) -> Provider;
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{env_key} is not set")]
    MissingCredential { env_key: &'static str },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Client(#[from] async_openai::error::OpenAIError),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("missing field `{0}` in upstream response")]
    MissingField(&'static str),

    #[error("upstream returned no completion text")]
    EmptyCompletion,

    /// The response parsed but had no `choices[0].message.content`.
    #[error("{provider} Error: {payload}")]
    UnexpectedShape {
        provider: &'static str,
        payload: String,
    },
}

impl UpstreamError {
    /// Text placed in the `answer` field when this error is folded into a reply.
    pub fn envelope_text(&self) -> String {
        match self {
            UpstreamError::UnexpectedShape { .. } => self.to_string(),
            other => format!("Backend error: {other}"),
        }
    }
}

/// Builds the backend matching `settings.provider`.
pub fn connect(settings: UpstreamSettings) -> Arc<dyn ChatBackend> {
    match settings.provider.spec().extraction {
        Extraction::Typed => Arc::new(OpenAiBackend::new(settings)),
        Extraction::Defensive => Arc::new(CheckedBackend::new(settings)),
        Extraction::Direct => Arc::new(IndexedBackend::new(settings)),
    }
}
