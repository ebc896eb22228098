//! Upstream processor access.
//!
//! The [`Upstream`] trait is the single seam between the workflow logic and
//! the network. [`HttpUpstream`] is the production implementation; tests
//! substitute a recording mock (see `test_utils`) or point `HttpUpstream`
//! at a local mock server through [`UpstreamConfig`].
//!
//! Each call is exactly one attempt. Outcomes are normalized into three
//! shapes:
//!
//! - 2xx: `Ok(UpstreamResponse)` with the parsed body
//! - non-2xx: `Err(PayByBankError::Upstream { status, body })`
//! - no response (connect failure, timeout): a network-kind error, status 0
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paybybank_lib::upstream::{HttpUpstream, UpstreamConfig};
//!
//! // Certification environment with the default 30s timeout
//! let upstream = HttpUpstream::new(UpstreamConfig::cert())?;
//!
//! // Or a local mock server in tests
//! let upstream = HttpUpstream::new(UpstreamConfig::new(mock_server.uri()))?;
//! ```

mod config;
mod http;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use config::{UpstreamConfig, CERT_BASE_URL, PROD_BASE_URL};
pub use http::HttpUpstream;

use crate::errors::ErrorKind;
use crate::signing::SignedRequest;
use crate::{PayByBankError, Result};

/// HTTP methods the processor client issues.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Signed without a body component.
    Get,
    /// Signed over the serialized payload.
    #[default]
    Post,
}

impl HttpMethod {
    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = PayByBankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            other => Err(PayByBankError::validation(format!(
                "unsupported method '{}': only GET and POST are allowed",
                other
            ))),
        }
    }
}

/// A signed request ready to be sent.
#[derive(Clone, Debug)]
pub struct OutboundRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Endpoint path relative to the configured base URL.
    pub path: String,
    /// Signing envelope, including the exact body bytes to send.
    pub signed: SignedRequest,
}

/// A 2xx response from the processor.
#[derive(Clone, Debug, PartialEq)]
pub struct UpstreamResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, parsed as JSON when possible.
    pub body: Value,
}

/// Transport to the processor.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Send one signed request. Never retries.
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse>;
}

#[async_trait]
impl<U: Upstream + ?Sized> Upstream for Arc<U> {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse> {
        (**self).send(request).await
    }
}

/// Unopinionated result of a single upstream call, as returned by the proxy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamResult {
    /// Whether the processor answered with a 2xx status.
    pub success: bool,
    /// Processor status, or 0 when no response was received.
    pub http_status: u16,
    /// Processor body, verbatim.
    #[serde(default)]
    pub body: Value,
    /// Failure classification.
    #[serde(default)]
    pub error_kind: ErrorKind,
    /// Error description when the call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UpstreamResult {
    /// Status a routing layer should answer the inbound call with.
    pub fn response_status(&self) -> u16 {
        response_status(self.error_kind, self.http_status)
    }
}

impl From<UpstreamResponse> for UpstreamResult {
    fn from(response: UpstreamResponse) -> Self {
        Self {
            success: true,
            http_status: response.status,
            body: response.body,
            error_kind: ErrorKind::None,
            message: None,
        }
    }
}

impl From<PayByBankError> for UpstreamResult {
    fn from(err: PayByBankError) -> Self {
        Self {
            success: false,
            http_status: err.http_status(),
            body: err.response_body(),
            error_kind: err.kind(),
            message: Some(err.to_string()),
        }
    }
}

impl From<Result<UpstreamResponse>> for UpstreamResult {
    fn from(result: Result<UpstreamResponse>) -> Self {
        match result {
            Ok(response) => response.into(),
            Err(err) => err.into(),
        }
    }
}

/// Map a result classification to the status a routing layer should return.
///
/// Upstream status when one exists, 400 for rejected input, 500 otherwise.
pub(crate) fn response_status(kind: ErrorKind, http_status: u16) -> u16 {
    match kind {
        ErrorKind::None | ErrorKind::Upstream if http_status != 0 => http_status,
        ErrorKind::Validation => 400,
        _ => 500,
    }
}

/// Parse a response body: JSON when possible, raw text otherwise, `Null` when empty.
pub(crate) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parsing() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!(" Post ".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert!("DELETE".parse::<HttpMethod>().is_err());
        assert_eq!(HttpMethod::default(), HttpMethod::Post);
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body(r#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(parse_body("Bad Gateway"), json!("Bad Gateway"));
    }

    #[test]
    fn test_result_from_network_error() {
        let result: UpstreamResult = PayByBankError::ConnectionFailed {
            target: "https://example.test".into(),
            reason: "refused".into(),
        }
        .into();
        assert_eq!(result.http_status, 0);
        assert_eq!(result.error_kind, ErrorKind::Network);
        assert_eq!(result.response_status(), 500);
        assert!(!result.success);
    }

    #[test]
    fn test_result_from_upstream_error_keeps_status() {
        let result: UpstreamResult = PayByBankError::Upstream {
            status: 404,
            body: json!({"message": "not found"}),
        }
        .into();
        assert_eq!(result.http_status, 404);
        assert_eq!(result.response_status(), 404);
        assert_eq!(result.body["message"], "not found");
    }

    #[test]
    fn test_validation_result_answers_400() {
        let result: UpstreamResult = PayByBankError::validation("missing credentials").into();
        assert_eq!(result.http_status, 0);
        assert_eq!(result.response_status(), 400);
        assert_eq!(result.body["error"], "missing credentials");
    }
}
