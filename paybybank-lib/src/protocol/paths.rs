//! Versioned endpoint paths on the processor.
//!
//! Paths are relative to the configured base URL, which already carries
//! the `/ch` prefix (see [`UpstreamConfig`](crate::upstream::UpstreamConfig)).

use crate::{PayByBankError, Result};

/// Charges endpoint, also used by the connectivity probe.
pub const CHARGES_PATH: &str = "/payments/v1/charges";

/// Customer-token endpoint, shared by profile creation and nonce inquiry.
pub const TOKENS_PATH: &str = "/payments-vas/v1/tokens";

/// Provider-credentials endpoint.
pub const PROVIDER_CREDENTIALS_PATH: &str = "/payments-vas/v1/security/provider-credentials";

/// Validate a caller-supplied endpoint path for the generic proxy.
///
/// The path must start with `/` and must not contain traversal sequences.
///
/// # Example
///
/// ```
/// use paybybank_lib::protocol::validate_endpoint_path;
///
/// assert!(validate_endpoint_path("/payments/v1/refunds").is_ok());
/// assert!(validate_endpoint_path("payments/v1/refunds").is_err());
/// assert!(validate_endpoint_path("/payments/../admin").is_err());
/// ```
pub fn validate_endpoint_path(path: &str) -> Result<&str> {
    if !path.starts_with('/') {
        return Err(PayByBankError::validation(format!(
            "endpoint '{}' must start with '/'",
            path
        )));
    }
    if path.contains("..") || path.contains("//") {
        return Err(PayByBankError::validation(format!(
            "endpoint '{}' contains traversal sequences",
            path
        )));
    }
    if path.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(PayByBankError::validation(format!(
            "endpoint '{}' contains whitespace or control characters",
            path.escape_default()
        )));
    }
    Ok(path)
}
