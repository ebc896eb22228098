//! Upstream client configuration.
//!
//! # Environment Variables
//!
//! - `PBB_BASE_URL` - Processor base URL including the `/ch` prefix
//!   (default: the certification environment)
//! - `PBB_TIMEOUT_SECS` - Request timeout in seconds (default: 30)

use serde::{Deserialize, Serialize};

/// Certification (sandbox) base URL.
pub const CERT_BASE_URL: &str = "https://connect-cert.fiservapis.com/ch";

/// Production base URL.
pub const PROD_BASE_URL: &str = "https://connect.fiservapis.com/ch";

/// Configuration for the processor HTTP client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::cert()
    }
}

impl UpstreamConfig {
    /// Create a configuration for an arbitrary base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout(),
        }
    }

    /// Configuration for the certification environment.
    pub fn cert() -> Self {
        Self::new(CERT_BASE_URL)
    }

    /// Configuration for the production environment.
    pub fn prod() -> Self {
        Self::new(PROD_BASE_URL)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Timeout in milliseconds, as reported in timeout errors.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_secs.saturating_mul(1000)
    }

    /// Build the full URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the certification defaults.
    pub fn from_env() -> Self {
        let mut config = std::env::var("PBB_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(Self::new)
            .unwrap_or_else(Self::cert);

        if let Some(secs) = std::env::var("PBB_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config = config.with_timeout(secs);
        }

        config
    }
}
