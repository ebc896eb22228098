//! Connectivity probe and service health.
//!
//! The probe validates a credential set without moving money: it submits a
//! non-capturing $0.01 charge against a fake personal check and reads the
//! processor's verdict from the status code alone.
//!
//! | Processor answer          | `success` | note                                     |
//! |---------------------------|-----------|------------------------------------------|
//! | 2xx                       | true      | none                                     |
//! | 4xx other than 401 / 403  | true      | credentials valid, content rejected      |
//! | 401 / 403                 | false     | could not authenticate                   |
//! | 5xx or no response        | false     | none                                     |

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::PayByBank;
use crate::credentials::{Credentials, Requirement};
use crate::errors::ErrorKind;
use crate::protocol::{CHARGES_PATH, SOURCE_TYPE_PAYMENT_CHECK};
use crate::upstream::{response_status, HttpMethod, Upstream, UpstreamResponse};
use crate::workflow::payloads::{
    ChargeAmount, ChargePayload, ChargeTransactionDetails, MerchantDetails,
};
use crate::workflow::{PayloadEnvelope, StepOutcome};
use crate::{PayByBankError, Result};

/// Amount charged by the probe.
pub const PROBE_AMOUNT: f64 = 0.01;

/// Note for a 4xx that proves the credentials authenticated.
pub const NOTE_BUSINESS_REJECTION: &str =
    "credentials valid, content rejected for business reasons";

/// Note for a 401 or 403.
pub const NOTE_AUTH_FAILED: &str = "could not authenticate";

/// Result of a connectivity probe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReport {
    /// Whether the credentials authenticated.
    pub success: bool,
    /// Interpretation of the processor's answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Processor status, or 0 when no response was received.
    pub http_status: u16,
    /// Processor body, verbatim.
    #[serde(default)]
    pub raw_response: Value,
    /// Error text when the probe call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Classification of the underlying call.
    #[serde(default)]
    pub error_kind: ErrorKind,
    /// When the probe completed (RFC 3339, UTC).
    pub checked_at: String,
    /// Round-trip time of the probe call, when one was made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl ConnectionReport {
    fn from_result(result: &Result<UpstreamResponse>) -> Self {
        let (http_status, raw_response, error_message, error_kind) = match result {
            Ok(response) => (response.status, response.body.clone(), None, ErrorKind::None),
            Err(err) => (
                err.http_status(),
                err.body(),
                Some(err.to_string()),
                err.kind(),
            ),
        };
        let (success, note) = classify(http_status);

        Self {
            success,
            note: note.map(str::to_string),
            http_status,
            raw_response,
            error_message,
            error_kind,
            checked_at: now_rfc3339(),
            latency_ms: None,
        }
    }

    fn rejected(err: &PayByBankError) -> Self {
        Self {
            success: false,
            note: None,
            http_status: err.http_status(),
            raw_response: Value::Null,
            error_message: Some(err.to_string()),
            error_kind: err.kind(),
            checked_at: now_rfc3339(),
            latency_ms: None,
        }
    }

    /// Set latency.
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    /// Status a routing layer should answer the inbound call with.
    pub fn response_status(&self) -> u16 {
        response_status(self.error_kind, self.http_status)
    }
}

impl From<ConnectionReport> for StepOutcome {
    fn from(report: ConnectionReport) -> Self {
        Self {
            success: report.success,
            http_status: report.http_status,
            data: report.raw_response,
            error_kind: report.error_kind,
            message: report.error_message,
            note: report.note,
            ..Self::default()
        }
    }
}

/// Interpret a probe status as `(success, note)`.
///
/// Status 0 stands for "no response".
pub fn classify(http_status: u16) -> (bool, Option<&'static str>) {
    match http_status {
        200..=299 => (true, None),
        401 | 403 => (false, Some(NOTE_AUTH_FAILED)),
        400..=499 => (true, Some(NOTE_BUSINESS_REJECTION)),
        _ => (false, None),
    }
}

/// Build the probe's charge payload.
pub fn probe_payload(credentials: &Credentials) -> ChargePayload {
    ChargePayload {
        amount: ChargeAmount::usd(PROBE_AMOUNT),
        source: json!({
            "sourceType": SOURCE_TYPE_PAYMENT_CHECK,
            "check": {
                "checkType": "PERSONAL",
                "accountNumber": "1234567890",
                "routingNumber": "021000021"
            }
        }),
        transaction_details: ChargeTransactionDetails {
            capture_flag: false,
        },
        merchant_details: MerchantDetails::from_credentials(credentials),
        transaction_interaction: None,
        customer: None,
    }
}

/// Liveness answer of a service embedding this client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Always `running`.
    pub status: String,
    /// Current time (RFC 3339, UTC).
    pub time: String,
}

/// Report that the service is running.
pub fn service_health() -> ServiceHealth {
    ServiceHealth {
        status: "running".to_string(),
        time: now_rfc3339(),
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

impl<U: Upstream> PayByBank<U> {
    /// Check that a credential set authenticates against the processor.
    ///
    /// Only `apiKey` and `apiSecret` are required. Without a merchant id the
    /// merchant block is sent empty, which the processor answers with a
    /// business rejection.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub async fn test_connection(&self, credentials: &Credentials) -> ConnectionReport {
        if let Err(err) = credentials.validate(Requirement::KeyAndSecret) {
            return ConnectionReport::rejected(&err);
        }

        let payload = PayloadEnvelope::from(probe_payload(credentials));
        let started = Instant::now();
        let result = self
            .call(credentials, HttpMethod::Post, CHARGES_PATH, Some(&payload))
            .await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let report = ConnectionReport::from_result(&result).with_latency(latency_ms);

        #[cfg(feature = "tracing")]
        tracing::info!(
            success = report.success,
            status = report.http_status,
            latency_ms,
            "connectivity probe finished"
        );

        report
    }
}
