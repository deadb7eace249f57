//! Pexels client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{PexelsError, PexelsResult};

pub const DEFAULT_API_URL: &str = "https://api.pexels.com";
pub const DEFAULT_DOWNLOAD_URL: &str = "https://www.pexels.com";
pub const DEFAULT_QUERY: &str = "drone nature";
pub const DEFAULT_PER_PAGE: u32 = 30;
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for [`PexelsClient`](crate::PexelsClient).
#[derive(Clone)]
pub struct PexelsConfig {
    /// Sent verbatim in the `Authorization` header
    pub api_key: String,
    /// Base URL of the search API
    pub api_url: String,
    /// Base URL clip downloads are resolved against
    pub download_url: String,
    /// Search query
    pub query: String,
    /// Results requested per search
    pub per_page: u32,
    /// Per-request timeout (covers the whole download body)
    pub timeout: Duration,
}

impl PexelsConfig {
    /// Config with default endpoints and query.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            query: DEFAULT_QUERY.to_string(),
            per_page: DEFAULT_PER_PAGE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> PexelsResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup; missing or unparsable values fall
    /// back to defaults, except the API key which is required.
    pub fn from_lookup<F>(lookup: F) -> PexelsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("PEXELS_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(PexelsError::MissingApiKey)?;

        Ok(Self {
            api_key,
            api_url: lookup("PEXELS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            download_url: lookup("PEXELS_DOWNLOAD_URL")
                .unwrap_or_else(|| DEFAULT_DOWNLOAD_URL.to_string()),
            query: lookup("PEXELS_QUERY").unwrap_or_else(|| DEFAULT_QUERY.to_string()),
            per_page: lookup("PEXELS_PER_PAGE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PER_PAGE),
            timeout: Duration::from_secs(
                lookup("PEXELS_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }
}

// Keeps the key out of logs
impl fmt::Debug for PexelsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PexelsConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("download_url", &self.download_url)
            .field("query", &self.query)
            .field("per_page", &self.per_page)
            .field("timeout", &self.timeout)
            .finish()
    }
}
