//! Step 1: customer profile creation.

use serde_json::Value;

use super::payloads::{
    CustomerProfilePayload, MerchantDetails, NewCustomer, TokenTransactionDetails,
};
use super::{CreateCustomerRequest, PayloadEnvelope, StepOutcome};
use crate::client::PayByBank;
use crate::credentials::{Credentials, Requirement};
use crate::errors::ErrorKind;
use crate::protocol::{MERCHANT_CUSTOMER_ID_PREFIX, TOKENS_PATH};
use crate::signing::current_timestamp_ms;
use crate::upstream::{HttpMethod, Upstream};

const CHECK_CREDENTIALS_HINT: &str = "Double-check your merchant credentials.";

/// Merchant customer id generated when the caller supplies none.
pub fn default_merchant_customer_id(timestamp_ms: u64) -> String {
    format!("{}{}", MERCHANT_CUSTOMER_ID_PREFIX, timestamp_ms)
}

/// Build the profile-creation payload.
pub fn customer_profile_payload(
    credentials: &Credentials,
    merchant_customer_id: impl Into<String>,
) -> CustomerProfilePayload {
    CustomerProfilePayload {
        customer: NewCustomer {
            merchant_customer_id: merchant_customer_id.into(),
        },
        merchant_details: MerchantDetails::from_credentials(credentials),
        transaction_details: TokenTransactionDetails::default(),
    }
}

/// Read `customer.providerCustomerId`, accepting a string or a number.
fn provider_customer_id(body: &Value) -> Option<String> {
    match body.pointer("/customer/providerCustomerId")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

impl<U: Upstream> PayByBank<U> {
    /// Create a Pay-by-Bank customer profile.
    ///
    /// On success the outcome carries the processor's `providerCustomerId`
    /// when the response includes one. The merchant customer id used is
    /// always reported back, including a generated `CUST-{millis}` id.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub async fn create_customer(
        &self,
        credentials: &Credentials,
        request: CreateCustomerRequest,
    ) -> StepOutcome {
        if let Err(err) = credentials.validate(Requirement::WithMerchant) {
            return StepOutcome::failed(&err);
        }

        let merchant_customer_id = request
            .merchant_customer_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| default_merchant_customer_id(current_timestamp_ms()));
        let payload: PayloadEnvelope =
            customer_profile_payload(credentials, merchant_customer_id.as_str()).into();

        let mut outcome = match self
            .call(credentials, HttpMethod::Post, TOKENS_PATH, Some(&payload))
            .await
        {
            Ok(response) => {
                let provider_customer_id = provider_customer_id(&response.body);
                let mut outcome = StepOutcome::succeeded(response);
                outcome.provider_customer_id = provider_customer_id;
                outcome
            }
            Err(err) if err.kind() == ErrorKind::Network => StepOutcome::failed(&err)
                .with_message(format!("{}. {}", err, CHECK_CREDENTIALS_HINT)),
            Err(err) => StepOutcome::failed(&err),
        };
        outcome.merchant_customer_id = Some(merchant_customer_id);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingUpstream;
    use serde_json::json;

    #[test]
    fn test_generated_ids_are_prefixed_and_time_based() {
        let a = default_merchant_customer_id(1_700_000_000_000);
        let b = default_merchant_customer_id(1_700_000_000_001);
        assert_eq!(a, "CUST-1700000000000");
        assert!(b.starts_with("CUST-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_payload_shape() {
        let creds = Credentials::new("k1", "s1", "m1").with_terminal_id("t1");
        let payload = customer_profile_payload(&creds, "CUST-1");
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({
                "customer": {"merchantCustomerId": "CUST-1"},
                "merchantDetails": {"merchantId": "m1", "terminalId": "t1"},
                "transactionDetails": {
                    "tokenProvider": "FISERV_PAY_BY_BANK",
                    "operationType": "CREATE"
                }
            })
        );
    }

    #[test]
    fn test_provider_customer_id_extraction() {
        assert_eq!(
            provider_customer_id(&json!({"customer": {"providerCustomerId": "pc-9"}})),
            Some("pc-9".to_string())
        );
        assert_eq!(
            provider_customer_id(&json!({"customer": {"providerCustomerId": 42}})),
            Some("42".to_string())
        );
        assert_eq!(provider_customer_id(&json!({"customer": {}})), None);
        assert_eq!(provider_customer_id(&Value::Null), None);
    }

    #[tokio::test]
    async fn test_create_customer_end_to_end() {
        let upstream =
            RecordingUpstream::responding(201, json!({"customer": {"providerCustomerId": "pc-9"}}));
        let client = PayByBank::with_upstream(upstream.clone());
        let creds = Credentials::new("k1", "s1", "m1");

        let outcome = client
            .create_customer(&creds, CreateCustomerRequest::default())
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.http_status, 201);
        assert_eq!(outcome.provider_customer_id.as_deref(), Some("pc-9"));

        let generated = outcome.merchant_customer_id.unwrap();
        assert!(generated.starts_with("CUST-"));

        let recorded = upstream.requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].method, HttpMethod::Post);
        assert_eq!(recorded[0].path, TOKENS_PATH);
        let sent: Value = serde_json::from_str(recorded[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent["customer"]["merchantCustomerId"], generated.as_str());
    }

    #[tokio::test]
    async fn test_caller_supplied_id_is_used() {
        let upstream = RecordingUpstream::responding(201, json!({}));
        let client = PayByBank::with_upstream(upstream.clone());
        let creds = Credentials::new("k1", "s1", "m1");

        let outcome = client
            .create_customer(
                &creds,
                CreateCustomerRequest {
                    merchant_customer_id: Some("shopper-7".into()),
                },
            )
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.provider_customer_id, None);
        assert_eq!(outcome.merchant_customer_id.as_deref(), Some("shopper-7"));
    }

    #[tokio::test]
    async fn test_missing_merchant_id_makes_no_call() {
        let upstream = RecordingUpstream::responding(201, json!({}));
        let client = PayByBank::with_upstream(upstream.clone());
        let creds = Credentials::new("k1", "s1", "");

        let outcome = client
            .create_customer(&creds, CreateCustomerRequest::default())
            .await;

        assert!(!outcome.success);
        assert_eq!(outcome.error_kind, ErrorKind::Validation);
        assert_eq!(outcome.response_status(), 400);
        assert_eq!(upstream.call_count(), 0);
    }

    #[tokio::test]
    async fn test_network_failure_hints_at_credentials() {
        let upstream = RecordingUpstream::failing_transport();
        let client = PayByBank::with_upstream(upstream);
        let creds = Credentials::new("k1", "s1", "m1");

        let outcome = client
            .create_customer(&creds, CreateCustomerRequest::default())
            .await;

        assert!(!outcome.success);
        assert_eq!(outcome.http_status, 0);
        assert!(outcome.message.unwrap().ends_with(CHECK_CREDENTIALS_HINT));
    }
}
