//! Caller-facing result of every operation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ErrorKind;
use crate::upstream::{response_status, UpstreamResponse, UpstreamResult};
use crate::PayByBankError;

/// Structured result of a workflow step, the probe or the proxy.
///
/// Failures never escape as errors; they are folded into an outcome with
/// `success == false`, the processor status (0 when no response arrived),
/// the processor body and a message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Processor status, or 0 when no response was received.
    pub http_status: u16,
    /// Processor body, verbatim.
    #[serde(default)]
    pub data: Value,
    /// Failure classification.
    #[serde(default)]
    pub error_kind: ErrorKind,
    /// Human-readable description of a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Extra interpretation of the processor's answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Processor-assigned customer id (create-customer).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_customer_id: Option<String>,
    /// Merchant customer id used (create-customer).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
    /// Flattened provider credential attributes (provider-credentials).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Map<String, Value>>,
    /// Token data returned for a nonce (nonce-inquiry).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_data: Option<Value>,
}

impl StepOutcome {
    /// Outcome of a 2xx processor answer.
    pub fn succeeded(response: UpstreamResponse) -> Self {
        Self {
            success: true,
            http_status: response.status,
            data: response.body,
            ..Self::default()
        }
    }

    /// Outcome of a failed call.
    pub fn failed(err: &PayByBankError) -> Self {
        Self {
            success: false,
            http_status: err.http_status(),
            data: err.response_body(),
            error_kind: err.kind(),
            message: Some(err.to_string()),
            ..Self::default()
        }
    }

    /// Replace the failure message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Status a routing layer should answer the inbound call with.
    ///
    /// The processor status when there is one, 400 for rejected input and
    /// 500 when no response was received.
    pub fn response_status(&self) -> u16 {
        response_status(self.error_kind, self.http_status)
    }
}

impl From<UpstreamResult> for StepOutcome {
    fn from(result: UpstreamResult) -> Self {
        Self {
            success: result.success,
            http_status: result.http_status,
            data: result.body,
            error_kind: result.error_kind,
            message: result.message,
            ..Self::default()
        }
    }
}

impl From<crate::Result<UpstreamResponse>> for StepOutcome {
    fn from(result: crate::Result<UpstreamResponse>) -> Self {
        match result {
            Ok(response) => Self::succeeded(response),
            Err(err) => Self::failed(&err),
        }
    }
}
