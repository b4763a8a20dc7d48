use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Anthropic API key used for explanation generation
    pub anthropic_api_key: String,

    /// Anthropic API base URL
    #[serde(default = "default_anthropic_api_url")]
    pub anthropic_api_url: String,

    /// Model used for explanation generation
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,

    /// Timeout for a single explanation call, in seconds
    #[serde(default = "default_explanation_timeout_secs")]
    pub explanation_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_anthropic_api_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_explanation_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
