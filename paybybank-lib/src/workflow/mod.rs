//! The four Pay-by-Bank workflow steps.
//!
//! Steps are independent and stateless; the caller carries ids from one step
//! to the next. Each step validates credentials first, builds its payload,
//! signs and sends it, then folds the result into a [`StepOutcome`].
//!
//! | Step | Method                             | Endpoint                 |
//! |------|------------------------------------|--------------------------|
//! | 1    | [`PayByBank::create_customer`]     | customer token           |
//! | 2    | [`PayByBank::provider_credentials`]| provider credentials     |
//! | 3    | [`PayByBank::nonce_inquiry`]       | customer token           |
//! | 4    | [`PayByBank::charge`]              | charges                  |
//!
//! [`PayByBank::create_customer`]: crate::PayByBank::create_customer
//! [`PayByBank::provider_credentials`]: crate::PayByBank::provider_credentials
//! [`PayByBank::nonce_inquiry`]: crate::PayByBank::nonce_inquiry
//! [`PayByBank::charge`]: crate::PayByBank::charge

mod charge;
mod customer;
mod nonce;
mod outcome;
pub mod payloads;
mod provider_credentials;
mod requests;

pub use charge::{charge_payload, charge_total, default_charge_source, DEFAULT_CHARGE_TOTAL};
pub use customer::{customer_profile_payload, default_merchant_customer_id};
pub use nonce::{token_inquiry_payload, NONCE_UNAVAILABLE_MESSAGE};
pub use outcome::StepOutcome;
pub use payloads::PayloadEnvelope;
pub use provider_credentials::{flatten_attributes, provider_credentials_payload};
pub use requests::{
    ChargeRequest, CreateCustomerRequest, NonceInquiryRequest, ProviderCredentialsRequest,
    ProxyRequest, WorkflowRequest,
};
