use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use studysphere_relay::{build_app, run_server, AppConfig, AppState};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::parse();
    init_tracing(config.log_json);

    let addr = config.bind_addr()?;
    let settings = config.upstream_settings();
    let spec = config.provider.spec();

    info!(
        provider = %config.provider,
        model = %settings.model,
        api_base = %settings.api_base,
        ask = spec.routes.ask,
        quiz = spec.routes.quiz,
        "Starting StudySphere relay"
    );
    if settings.api_key.is_none() {
        warn!(
            env_key = spec.env_key,
            "No API key configured; every relay call will return a backend error"
        );
    }

    let app = build_app(AppState::from_settings(settings));
    run_server(app, addr).await
}
