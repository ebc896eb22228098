//! Per-call processor credentials.
//!
//! Credentials arrive with every call and live only for its duration. They
//! are wiped from memory on drop and never appear in `Debug` output, so a
//! stray `{:?}` or tracing field cannot leak the key or secret.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{PayByBankError, Result};

const REDACTED: &str = "[REDACTED]";

/// Credentials for one authenticated call.
///
/// Deserializes from the camelCase field names used by the inbound routing
/// layer (`apiKey`, `apiSecret`, `merchantId`, `terminalId`). Missing fields
/// deserialize as empty and are caught by [`Credentials::validate`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Public API key, sent in the `Api-Key` header.
    #[serde(default)]
    pub api_key: String,
    /// HMAC signing secret. Never sent on the wire.
    #[serde(default, skip_serializing)]
    pub api_secret: String,
    /// Merchant identifier placed in `merchantDetails`.
    #[serde(default)]
    pub merchant_id: String,
    /// Optional terminal identifier placed in `merchantDetails`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
}

/// Which credential fields an operation needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// `apiKey` and `apiSecret` only (probe, proxy).
    KeyAndSecret,
    /// `apiKey`, `apiSecret` and `merchantId` (workflow steps).
    WithMerchant,
}

impl Credentials {
    /// Create credentials without a terminal id.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        merchant_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            merchant_id: merchant_id.into(),
            terminal_id: None,
        }
    }

    /// Set the terminal id.
    pub fn with_terminal_id(mut self, terminal_id: impl Into<String>) -> Self {
        self.terminal_id = Some(terminal_id.into());
        self
    }

    /// Check that the fields required by an operation are present.
    ///
    /// Runs before any payload is built, so a failure here guarantees that
    /// nothing was sent to the processor.
    pub fn validate(&self, requirement: Requirement) -> Result<()> {
        let mut missing = Vec::new();
        if self.api_key.trim().is_empty() {
            missing.push("apiKey");
        }
        if self.api_secret.is_empty() {
            missing.push("apiSecret");
        }
        if requirement == Requirement::WithMerchant && self.merchant_id.trim().is_empty() {
            missing.push("merchantId");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PayByBankError::validation(format!(
                "missing credentials: {}",
                missing.join(", ")
            )))
        }
    }

    /// The merchant id, if one was supplied.
    pub fn merchant_id(&self) -> Option<&str> {
        let id = self.merchant_id.trim();
        (!id.is_empty()).then_some(id)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &REDACTED)
            .field("api_secret", &REDACTED)
            .field("merchant_id", &self.merchant_id)
            .field("terminal_id", &self.terminal_id)
            .finish()
    }
}
