//! Inbound request variants, one per operation.
//!
//! Field names follow the camelCase names the routing layer receives, so a
//! parsed request body can be deserialized straight into these types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// CreateCustomerProfile input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    /// Merchant-assigned id; generated as `CUST-{millis}` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
}

/// FetchProviderCredentials input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialsRequest {
    /// Profile to bind the credentials to, sent as the `tokenData` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_customer_id: Option<String>,
    /// SDK configuration id, sent as the `configId` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,
}

/// NonceInquiry input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceInquiryRequest {
    /// Single-use token obtained client-side.
    #[serde(default)]
    pub nonce: String,
    /// Merchant-assigned customer id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
    /// Processor-assigned customer id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_customer_id: Option<String>,
}

impl NonceInquiryRequest {
    /// Inquiry for a nonce without a customer link.
    pub fn new(nonce: impl Into<String>) -> Self {
        Self {
            nonce: nonce.into(),
            ..Self::default()
        }
    }
}

/// Charge input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    /// Amount in major units; accepts a number or a numeric string.
    #[serde(
        default,
        deserialize_with = "deserialize_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,
    /// Payment instrument; defaults to a Pay-by-Bank token stub.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    /// Capture immediately unless explicitly `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_flag: Option<bool>,
    /// Merchant-assigned customer id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
    /// Processor-assigned customer id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_customer_id: Option<String>,
}

/// GenericProxy input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    /// Endpoint path; defaults to the charges path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// `GET` or `POST` (case-insensitive); defaults to `POST`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Payload forwarded as-is; defaults to `{}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Any inbound operation, tagged by `operation`.
///
/// # Example
///
/// ```
/// use paybybank_lib::workflow::WorkflowRequest;
///
/// let request: WorkflowRequest = serde_json::from_str(
///     r#"{"operation":"nonce-inquiry","nonce":"abc"}"#,
/// ).unwrap();
/// assert_eq!(request.name(), "nonce-inquiry");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "kebab-case")]
pub enum WorkflowRequest {
    /// Connectivity probe.
    TestConnection,
    /// Step 1: customer profile creation.
    CreateCustomer(CreateCustomerRequest),
    /// Step 2: provider credentials for the client-side SDK.
    ProviderCredentials(ProviderCredentialsRequest),
    /// Step 3: nonce detokenization.
    NonceInquiry(NonceInquiryRequest),
    /// Step 4: charge.
    Charge(ChargeRequest),
    /// Signed passthrough.
    Proxy(ProxyRequest),
}

impl WorkflowRequest {
    /// The operation name, as used in the `operation` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TestConnection => "test-connection",
            Self::CreateCustomer(_) => "create-customer",
            Self::ProviderCredentials(_) => "provider-credentials",
            Self::NonceInquiry(_) => "nonce-inquiry",
            Self::Charge(_) => "charge",
            Self::Proxy(_) => "proxy",
        }
    }
}

fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
