//! Outbound payload shapes.
//!
//! Field declaration order is the order keys appear in the serialized JSON,
//! and therefore in the signed canonical string.

use serde::Serialize;
use serde_json::Value;

use crate::credentials::Credentials;
use crate::protocol::{
    CURRENCY_USD, OPERATION_CREATE, ORIGIN_ECOM, SOURCE_TYPE_PAYMENT_TOKEN, TOKEN_PROVIDER,
};

/// `merchantDetails` block present in every step payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantDetails {
    /// Merchant identifier, omitted when blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    /// Terminal identifier, omitted when not supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
}

impl MerchantDetails {
    /// Take the merchant fields from the call's credentials.
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self {
            merchant_id: credentials.merchant_id().map(str::to_string),
            terminal_id: credentials
                .terminal_id
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }
}

/// Optional `customer` block linking a call to an existing profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    /// Merchant-assigned customer id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
    /// Processor-assigned customer id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_customer_id: Option<String>,
}

impl CustomerRef {
    /// Build the block, or `None` when neither id was supplied.
    pub fn from_ids(
        merchant_customer_id: Option<&str>,
        provider_customer_id: Option<&str>,
    ) -> Option<Self> {
        let merchant_customer_id = non_empty(merchant_customer_id);
        let provider_customer_id = non_empty(provider_customer_id);
        if merchant_customer_id.is_none() && provider_customer_id.is_none() {
            return None;
        }
        Some(Self {
            merchant_customer_id,
            provider_customer_id,
        })
    }
}

/// `customer` block of a profile creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    /// Merchant-assigned customer id (caller-supplied or generated).
    pub merchant_customer_id: String,
}

/// `transactionDetails` block of a profile creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransactionDetails {
    /// Always the Pay-by-Bank token provider.
    pub token_provider: String,
    /// Always `CREATE`.
    pub operation_type: String,
}

impl Default for TokenTransactionDetails {
    fn default() -> Self {
        Self {
            token_provider: TOKEN_PROVIDER.to_string(),
            operation_type: OPERATION_CREATE.to_string(),
        }
    }
}

/// Payload of CreateCustomerProfile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfilePayload {
    /// Customer being created.
    pub customer: NewCustomer,
    /// Merchant fields.
    pub merchant_details: MerchantDetails,
    /// Token provider and operation.
    pub transaction_details: TokenTransactionDetails,
}

/// One `{key, value}` attribute of a provider-credentials exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CredentialAttribute {
    /// Attribute name.
    pub key: String,
    /// Attribute value.
    pub value: String,
}

impl CredentialAttribute {
    /// Create an attribute.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// `providerCredentials` block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentials {
    /// Always the Pay-by-Bank token provider.
    pub credential_type: String,
    /// Requested attributes.
    pub attributes: Vec<CredentialAttribute>,
}

/// Payload of FetchProviderCredentials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialsPayload {
    /// Credential request.
    pub provider_credentials: ProviderCredentials,
    /// Merchant fields.
    pub merchant_details: MerchantDetails,
}

/// `source` block of a nonce inquiry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSource {
    /// Always `PaymentToken`.
    pub source_type: String,
    /// The nonce being exchanged.
    pub token_data: String,
    /// Always the Pay-by-Bank token provider.
    pub token_source: String,
}

impl TokenSource {
    /// A Pay-by-Bank payment token source for the given nonce.
    pub fn pay_by_bank(token_data: impl Into<String>) -> Self {
        Self {
            source_type: SOURCE_TYPE_PAYMENT_TOKEN.to_string(),
            token_data: token_data.into(),
            token_source: TOKEN_PROVIDER.to_string(),
        }
    }
}

/// Payload of NonceInquiry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInquiryPayload {
    /// Nonce to detokenize.
    pub source: TokenSource,
    /// Merchant fields.
    pub merchant_details: MerchantDetails,
    /// Customer link, when any id was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRef>,
}

/// `amount` block of a charge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChargeAmount {
    /// Amount in major units.
    pub total: f64,
    /// Always `USD`.
    pub currency: String,
}

impl ChargeAmount {
    /// A USD amount.
    pub fn usd(total: f64) -> Self {
        Self {
            total,
            currency: CURRENCY_USD.to_string(),
        }
    }
}

/// `transactionDetails` block of a charge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeTransactionDetails {
    /// Whether the charge is captured immediately.
    pub capture_flag: bool,
}

/// `transactionInteraction` block of a charge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionInteraction {
    /// Transaction origin.
    pub origin: String,
}

impl TransactionInteraction {
    /// E-commerce origin.
    pub fn ecom() -> Self {
        Self {
            origin: ORIGIN_ECOM.to_string(),
        }
    }
}

/// Payload of Charge and of the connectivity probe.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargePayload {
    /// Amount to charge.
    pub amount: ChargeAmount,
    /// Payment instrument, passed through as given.
    pub source: Value,
    /// Capture behaviour.
    pub transaction_details: ChargeTransactionDetails,
    /// Merchant fields.
    pub merchant_details: MerchantDetails,
    /// Interaction origin; absent on the probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_interaction: Option<TransactionInteraction>,
    /// Customer link, when any id was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRef>,
}

/// Every payload the client signs, one variant per step plus passthrough.
///
/// Serializes transparently as the wrapped payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadEnvelope {
    /// CreateCustomerProfile.
    CustomerProfile(CustomerProfilePayload),
    /// FetchProviderCredentials.
    ProviderCredentialsRequest(ProviderCredentialsPayload),
    /// NonceInquiry.
    TokenInquiry(TokenInquiryPayload),
    /// Charge and connectivity probe.
    ChargeRequest(ChargePayload),
    /// Generic proxy.
    GenericPayload(Value),
}

impl PayloadEnvelope {
    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CustomerProfile(_) => "customer_profile",
            Self::ProviderCredentialsRequest(_) => "provider_credentials",
            Self::TokenInquiry(_) => "token_inquiry",
            Self::ChargeRequest(_) => "charge",
            Self::GenericPayload(_) => "generic",
        }
    }
}

impl From<CustomerProfilePayload> for PayloadEnvelope {
    fn from(payload: CustomerProfilePayload) -> Self {
        Self::CustomerProfile(payload)
    }
}

impl From<ProviderCredentialsPayload> for PayloadEnvelope {
    fn from(payload: ProviderCredentialsPayload) -> Self {
        Self::ProviderCredentialsRequest(payload)
    }
}

impl From<TokenInquiryPayload> for PayloadEnvelope {
    fn from(payload: TokenInquiryPayload) -> Self {
        Self::TokenInquiry(payload)
    }
}

impl From<ChargePayload> for PayloadEnvelope {
    fn from(payload: ChargePayload) -> Self {
        Self::ChargeRequest(payload)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merchant_details_omits_missing_terminal() {
        let creds = Credentials::new("k1", "s1", "m1");
        let value = serde_json::to_value(MerchantDetails::from_credentials(&creds)).unwrap();
        assert_eq!(value, json!({"merchantId": "m1"}));

        let creds = creds.with_terminal_id("t1");
        let value = serde_json::to_value(MerchantDetails::from_credentials(&creds)).unwrap();
        assert_eq!(value, json!({"merchantId": "m1", "terminalId": "t1"}));
    }

    #[test]
    fn test_merchant_details_omits_blank_merchant() {
        let creds = Credentials::new("k1", "s1", "  ");
        let value = serde_json::to_value(MerchantDetails::from_credentials(&creds)).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_customer_ref_requires_an_id() {
        assert_eq!(CustomerRef::from_ids(None, Some("  ")), None);

        let customer = CustomerRef::from_ids(None, Some("pc-9")).unwrap();
        assert_eq!(
            serde_json::to_value(customer).unwrap(),
            json!({"providerCustomerId": "pc-9"})
        );
    }

    #[test]
    fn test_envelope_serializes_transparently() {
        let envelope = PayloadEnvelope::from(TokenInquiryPayload {
            source: TokenSource::pay_by_bank("nonce-1"),
            merchant_details: MerchantDetails {
                merchant_id: Some("m1".into()),
                terminal_id: None,
            },
            customer: None,
        });

        assert_eq!(envelope.kind(), "token_inquiry");
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"source":{"sourceType":"PaymentToken","tokenData":"nonce-1","tokenSource":"FISERV_PAY_BY_BANK"},"merchantDetails":{"merchantId":"m1"}}"#
        );
    }
}
