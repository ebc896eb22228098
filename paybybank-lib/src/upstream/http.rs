//! reqwest-backed processor client.

use std::time::Duration;

use async_trait::async_trait;

use super::config::UpstreamConfig;
use super::{parse_body, HttpMethod, OutboundRequest, Upstream, UpstreamResponse};
use crate::{PayByBankError, Result};

/// HTTP client for the processor REST API.
///
/// Holds one connection pool for its lifetime; the client itself carries no
/// per-call state and can be shared freely across concurrent calls.
#[derive(Clone, Debug)]
pub struct HttpUpstream {
    config: UpstreamConfig,
    client: reqwest::Client,
}

impl HttpUpstream {
    /// Create a client for the given configuration.
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(PayByBankError::Config("base URL cannot be empty".to_string()));
        }
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            PayByBankError::Config(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        if config.timeout_secs == 0 {
            return Err(PayByBankError::Config(
                "timeout must be at least one second".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PayByBankError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Get the configuration.
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Map reqwest errors to PayByBankError.
    fn map_reqwest_error(&self, e: reqwest::Error, operation: String, url: &str) -> PayByBankError {
        if e.is_timeout() {
            PayByBankError::ConnectionTimeout {
                operation,
                timeout_ms: self.config.timeout_ms(),
            }
        } else if e.is_connect() {
            PayByBankError::ConnectionFailed {
                target: url.to_string(),
                reason: e.to_string(),
            }
        } else {
            PayByBankError::Transport(format!("{} failed: {}", operation, e))
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip(self, request),
            fields(
                method = %request.method,
                path = %request.path,
                request_id = %request.signed.request_id()
            )
        )
    )]
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse> {
        let url = self.config.url(&request.path);
        let operation = format!("{} {}", request.method, request.path);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        for (name, value) in request.signed.headers() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.signed.body() {
            builder = builder.body(body.to_string());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e, operation.clone(), &url))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(e, operation.clone(), &url))?;
        let body = parse_body(&text);

        #[cfg(feature = "tracing")]
        tracing::debug!(status, "processor responded");

        if !(200..300).contains(&status) {
            return Err(PayByBankError::Upstream { status, body });
        }

        Ok(UpstreamResponse { status, body })
    }
}
