//! Process configuration from flags and environment variables.

use anyhow::bail;
use chainintel_api::ApiConfig;
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.chainintel.io";

#[derive(Debug, Parser)]
#[command(
    name = "chainintel-mcp",
    version,
    about = "MCP server exposing the ChainIntel blockchain-intelligence API as tools"
)]
pub struct Cli {
    /// ChainIntel API key.
    #[arg(long, env = "CHAININTEL_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the ChainIntel API.
    #[arg(long, env = "CHAININTEL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Outbound HTTP timeout in seconds.
    #[arg(long, env = "CHAININTEL_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Placeholder values that indicate a key was never actually configured.
const PLACEHOLDER_KEYS: &[&str] = &[
    "your_api_key_here",
    "replace_with_your_key",
    "api_key",
    "test_key",
    "demo_key",
    "example_key",
    "placeholder",
];

/// Check that a key is non-empty, not a known placeholder, and contains
/// only alphanumeric characters, hyphens, and underscores.
#[must_use]
pub fn validate_api_key(key: &str) -> bool {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return false;
    }
    let normalized = trimmed.to_ascii_lowercase();
    if PLACEHOLDER_KEYS.contains(&normalized.as_str()) {
        return false;
    }
    trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Cli {
    /// Validate and convert into the client configuration. Fails fast so a
    /// misconfigured process never starts serving.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing/placeholder/malformed API key, a zero
    /// timeout, or an unparsable base URL.
    pub fn into_api_config(self) -> anyhow::Result<ApiConfig> {
        if !validate_api_key(&self.api_key) {
            bail!(
                "CHAININTEL_API_KEY is missing or invalid: the key must contain only \
                 alphanumeric characters, hyphens, and underscores, and must not be a \
                 placeholder value"
            );
        }
        if self.timeout_secs == 0 {
            bail!("CHAININTEL_TIMEOUT_SECS must be greater than zero");
        }
        Ok(ApiConfig::new(
            self.api_key,
            self.base_url,
            Duration::from_secs(self.timeout_secs),
        )?)
    }
}
