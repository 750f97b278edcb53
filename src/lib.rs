pub mod api;
pub mod config;
pub mod provider;
pub mod relay;
pub mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tracing::info;

pub use config::{AppConfig, UpstreamSettings};
pub use provider::Provider;
pub use relay::{RelayOutcome, EMPTY_QUESTION_REPLY, QUIZ_PROMPT};
pub use upstream::{connect, ChatBackend, UpstreamError};

/// Shared by every request; holds nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn ChatBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    pub fn from_settings(settings: UpstreamSettings) -> Self {
        Self::new(connect(settings))
    }
}

pub fn build_app(state: AppState) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "Listening");
    axum::serve(listener, app).await.context("server failed")
}
