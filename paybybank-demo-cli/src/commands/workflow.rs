//! Workflow commands - the four Pay-by-Bank steps

use anyhow::Result;
use paybybank_lib::workflow::{
    ChargeRequest, CreateCustomerRequest, NonceInquiryRequest, ProviderCredentialsRequest,
};

use super::{parse_json_arg, Session};

pub async fn create_customer(
    session: &Session,
    merchant_customer_id: Option<String>,
) -> Result<bool> {
    let outcome = session
        .client
        .create_customer(
            &session.credentials,
            CreateCustomerRequest {
                merchant_customer_id,
            },
        )
        .await;
    session.report("Create Customer", &outcome)
}

pub async fn provider_credentials(
    session: &Session,
    provider_customer_id: Option<String>,
    config_id: Option<String>,
) -> Result<bool> {
    let outcome = session
        .client
        .provider_credentials(
            &session.credentials,
            ProviderCredentialsRequest {
                provider_customer_id,
                config_id,
            },
        )
        .await;
    session.report("Provider Credentials", &outcome)
}

pub async fn nonce_inquiry(
    session: &Session,
    nonce: String,
    merchant_customer_id: Option<String>,
    provider_customer_id: Option<String>,
) -> Result<bool> {
    let outcome = session
        .client
        .nonce_inquiry(
            &session.credentials,
            NonceInquiryRequest {
                nonce,
                merchant_customer_id,
                provider_customer_id,
            },
        )
        .await;
    session.report("Nonce Inquiry", &outcome)
}

/// Charge flags as parsed from the command line.
pub struct ChargeArgs {
    pub amount: Option<f64>,
    pub source: Option<String>,
    pub capture: bool,
    pub merchant_customer_id: Option<String>,
    pub provider_customer_id: Option<String>,
}

pub async fn charge(session: &Session, args: ChargeArgs) -> Result<bool> {
    let request = ChargeRequest {
        amount: args.amount,
        source: parse_json_arg("source", args.source)?,
        capture_flag: Some(args.capture),
        merchant_customer_id: args.merchant_customer_id,
        provider_customer_id: args.provider_customer_id,
    };

    let outcome = session
        .client
        .charge(&session.credentials, request)
        .await;
    session.report("Charge", &outcome)
}
