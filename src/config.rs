use std::env;
use std::net::SocketAddr;

use clap::Parser;

use crate::provider::Provider;

/// Process-wide configuration, parsed once at startup.
#[derive(Debug, Clone, Parser)]
#[command(name = "studysphere-relay", version, about, long_about = None)]
pub struct AppConfig {
    /// Upstream provider variant to relay to
    #[arg(long, env = "RELAY_PROVIDER", value_enum, default_value_t = Provider::OpenAi)]
    pub provider: Provider,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Override the provider's API base URL
    #[arg(long, env = "RELAY_API_BASE")]
    pub api_base: Option<String>,

    /// Override the provider's model identifier
    #[arg(long, env = "RELAY_MODEL")]
    pub model: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, env = "RELAY_LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address {host}:{port}: {source}")]
    BindAddress {
        host: String,
        port: u16,
        source: std::net::AddrParseError,
    },
}

impl AppConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|source| ConfigError::BindAddress {
                host: self.host.clone(),
                port: self.port,
                source,
            })
    }

    /// Resolves everything a backend needs, reading the provider's credential
    /// from the environment.
    pub fn upstream_settings(&self) -> UpstreamSettings {
        let spec = self.provider.spec();
        let api_key = env::var(spec.env_key)
            .ok()
            .filter(|value| !value.trim().is_empty());

        UpstreamSettings {
            provider: self.provider,
            api_base: self
                .api_base
                .clone()
                .unwrap_or_else(|| spec.default_api_base.to_string()),
            model: self
                .model
                .clone()
                .unwrap_or_else(|| spec.default_model.to_string()),
            api_key,
        }
    }
}

/// Connection details for one upstream provider.
#[derive(Clone)]
pub struct UpstreamSettings {
    pub provider: Provider,
    pub api_base: String,
    pub model: String,
    /// `None` when the provider's key variable was unset or blank.
    pub api_key: Option<String>,
}

impl UpstreamSettings {
    /// Settings for `provider` with its default base URL and model.
    pub fn new(provider: Provider, api_key: Option<String>) -> Self {
        let spec = provider.spec();
        Self {
            provider,
            api_base: spec.default_api_base.to_string(),
            model: spec.default_model.to_string(),
            api_key,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// `<base>/chat/completions`, tolerant of a trailing slash on the base.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for UpstreamSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamSettings")
            .field("provider", &self.provider)
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_provider_spec() {
        let config = AppConfig::parse_from(["studysphere-relay", "--provider", "groq"]);
        assert_eq!(config.provider, Provider::Groq);

        let settings = config.upstream_settings();
        assert_eq!(settings.api_base, "https://api.groq.com/openai/v1");
        assert_eq!(settings.model, "llama-3.1-8b-instant");
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = AppConfig::parse_from([
            "studysphere-relay",
            "--provider",
            "deepseek",
            "--api-base",
            "http://localhost:9999/",
            "--model",
            "deepseek-reasoner",
        ]);
        let settings = config.upstream_settings();
        assert_eq!(settings.model, "deepseek-reasoner");
        assert_eq!(
            settings.completions_url(),
            "http://localhost:9999/chat/completions"
        );
    }

    #[test]
    fn bad_host_is_reported() {
        let config = AppConfig::parse_from(["studysphere-relay", "--host", "not a host"]);
        let err = config.bind_addr().unwrap_err();
        assert!(err.to_string().contains("not a host"));
    }

    #[test]
    fn debug_hides_api_key() {
        let settings = UpstreamSettings::new(Provider::OpenAi, Some("sk-secret".into()));
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("has_api_key: true"));
    }
}
