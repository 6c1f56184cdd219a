//! Immutable client configuration.

use crate::error::ConfigError;
use std::time::Duration;
use url::Url;

/// Credentials and base settings for the ChainIntel API.
///
/// Built once at process start and shared read-only by the client; never
/// mutated after construction. The client refuses to start without a key
/// and a parseable base URL.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Default outbound HTTP timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the base URL does not
    /// parse as a URL.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            source,
        })?;

        Ok(Self {
            api_key,
            base_url,
            timeout,
        })
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Masked form of the API key, safe for logs and liveness output.
    ///
    /// Keys of 8 characters or fewer mask to exactly `***`; longer keys keep
    /// the first and last 4 characters around the mask.
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            return "***".to_string();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}***{tail}")
    }
}
