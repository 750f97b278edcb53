//! Upstream provider variants.
//!
//! A relay process serves exactly one [`Provider`]. Each variant carries a
//! static [`ProviderSpec`] describing where it lives, which credential it
//! reads, which routes it answers on, and how its response is unwrapped.

use std::fmt;

use clap::ValueEnum;

/// Route naming used by a variant's endpoint pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoutePaths {
    pub ask: &'static str,
    pub quiz: &'static str,
}

const SHORT_ROUTES: RoutePaths = RoutePaths {
    ask: "/ask",
    quiz: "/quiz",
};

const API_ROUTES: RoutePaths = RoutePaths {
    ask: "/api/chat",
    quiz: "/api/quiz",
};

/// How the completion text is pulled out of a provider's response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extraction {
    /// Typed client response object.
    Typed,
    /// Raw JSON, shape checked; a bad shape becomes `"<Provider> Error: <payload>"`.
    Defensive,
    /// Raw JSON indexed step by step; the first missing step is a failure.
    Direct,
}

/// Static description of one provider variant.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Human-readable name used in logs and error prefixes.
    pub display_name: &'static str,
    /// Environment variable holding the API key.
    pub env_key: &'static str,
    pub default_api_base: &'static str,
    pub default_model: &'static str,
    pub routes: RoutePaths,
    pub extraction: Extraction,
}

static OPENAI: ProviderSpec = ProviderSpec {
    display_name: "OpenAI",
    env_key: "OPENAI_API_KEY",
    default_api_base: "https://api.openai.com/v1",
    default_model: "gpt-4o-mini",
    routes: SHORT_ROUTES,
    extraction: Extraction::Typed,
};

static DEEPSEEK: ProviderSpec = ProviderSpec {
    display_name: "DeepSeek",
    env_key: "DEEPSEEK_API_KEY",
    default_api_base: "https://api.deepseek.com",
    default_model: "deepseek-chat",
    routes: API_ROUTES,
    extraction: Extraction::Defensive,
};

static GROQ: ProviderSpec = ProviderSpec {
    display_name: "Groq",
    env_key: "GROQ_API_KEY",
    default_api_base: "https://api.groq.com/openai/v1",
    default_model: "llama-3.1-8b-instant",
    routes: API_ROUTES,
    extraction: Extraction::Defensive,
};

static OPENAI_RAW: ProviderSpec = ProviderSpec {
    display_name: "OpenAI",
    env_key: "OPENAI_API_KEY",
    default_api_base: "https://api.openai.com/v1",
    default_model: "gpt-4o-mini",
    routes: SHORT_ROUTES,
    extraction: Extraction::Direct,
};

/// The closed set of upstream variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// OpenAI through the `async-openai` client.
    #[default]
    #[value(name = "openai")]
    OpenAi,
    #[value(name = "deepseek")]
    DeepSeek,
    #[value(name = "groq")]
    Groq,
    /// OpenAI over plain HTTP with unchecked indexing.
    #[value(name = "openai-raw")]
    OpenAiRaw,
}

impl Provider {
    pub fn spec(self) -> &'static ProviderSpec {
        match self {
            Provider::OpenAi => &OPENAI,
            Provider::DeepSeek => &DEEPSEEK,
            Provider::Groq => &GROQ,
            Provider::OpenAiRaw => &OPENAI_RAW,
        }
    }

    pub fn routes(self) -> RoutePaths {
        self.spec().routes
    }

    pub fn display_name(self) -> &'static str {
        self.spec().display_name
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::OpenAi => "openai",
            Provider::DeepSeek => "deepseek",
            Provider::Groq => "groq",
            Provider::OpenAiRaw => "openai-raw",
        };
        f.write_str(name)
    }
}
