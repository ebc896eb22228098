//! Test fixtures for processor bodies and credentials.

use serde_json::{json, Value};

use crate::credentials::Credentials;

/// Collection of commonly used test fixtures.
pub struct TestFixtures;

impl TestFixtures {
    /// API key used across tests.
    pub const API_KEY: &'static str = "k1";
    /// API secret used across tests.
    pub const API_SECRET: &'static str = "s1";
    /// Merchant id used across tests.
    pub const MERCHANT_ID: &'static str = "m1";

    /// Complete credentials without a terminal id.
    pub fn credentials() -> Credentials {
        Credentials::new(Self::API_KEY, Self::API_SECRET, Self::MERCHANT_ID)
    }

    /// Credentials lacking the merchant id (valid for probe and proxy only).
    pub fn credentials_without_merchant() -> Credentials {
        Credentials::new(Self::API_KEY, Self::API_SECRET, "")
    }

    /// Body of a successful profile creation.
    pub fn customer_created(provider_customer_id: &str) -> Value {
        json!({
            "customer": {
                "providerCustomerId": provider_customer_id,
                "merchantCustomerId": "CUST-1700000000000"
            }
        })
    }

    /// Body of a successful provider-credentials exchange.
    pub fn provider_credentials(attributes: &[(&str, &str)]) -> Value {
        let attributes: Vec<Value> = attributes
            .iter()
            .map(|(key, value)| json!({"key": key, "value": value}))
            .collect();
        json!({
            "providerCredentials": {
                "credentialType": "FISERV_PAY_BY_BANK",
                "attributes": attributes
            }
        })
    }

    /// Body of a successful nonce inquiry.
    pub fn token_inquiry(token_data: &str) -> Value {
        json!({
            "source": {
                "sourceType": "PaymentToken",
                "tokenData": token_data,
                "tokenSource": "FISERV_PAY_BY_BANK"
            }
        })
    }

    /// Body of an approved charge.
    pub fn charge_approved() -> Value {
        json!({
            "gatewayResponse": {
                "transactionState": "AUTHORIZED",
                "transactionProcessingDetails": {"transactionId": "txn-1"}
            }
        })
    }

    /// Body of a business-rule rejection.
    pub fn business_rejection() -> Value {
        json!({
            "error": [{"type": "HOST", "code": "104", "message": "Invalid account"}]
        })
    }
}
