//! Pay-by-Bank library.
//!
//! This crate stays stateless: credentials arrive with every call, every
//! outbound request is signed afresh, and the network sits behind the
//! [`Upstream`] trait so callers can inject their own transport.
//!
//! # Features
//!
//! - **Request Signing**: HMAC-SHA256 over `apiKey ‖ requestId ‖ timestamp ‖ body`
//! - **Workflow Steps**: customer profile, provider credentials, nonce inquiry, charge
//! - **Generic Proxy**: signed passthrough to any processor endpoint
//! - **Connectivity Probe**: credential check without moving money
//!
//! # Example
//!
//! ```ignore
//! use paybybank_lib::prelude::*;
//!
//! let client = PayByBank::new(UpstreamConfig::cert())?;
//! let creds = Credentials::new("api-key", "api-secret", "merchant-1");
//!
//! let report = client.test_connection(&creds).await;
//! assert!(report.success);
//!
//! let customer = client.create_customer(&creds, CreateCustomerRequest::default()).await;
//! let charge = client
//!     .charge(
//!         &creds,
//!         ChargeRequest {
//!             amount: Some(12.50),
//!             provider_customer_id: customer.provider_customer_id,
//!             ..Default::default()
//!         },
//!     )
//!     .await;
//! println!("{}", serde_json::to_string_pretty(&charge)?);
//! ```

mod client;
pub mod credentials;
pub mod errors;
pub mod health;
pub mod prelude;
pub mod protocol;
mod proxy;
pub mod signing;
pub mod upstream;
pub mod workflow;

/// Test utilities for processor interactions.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::PayByBank;
pub use credentials::{Credentials, Requirement};
pub use errors::{ErrorKind, PayByBankError};
pub use health::{service_health, ConnectionReport, ServiceHealth};
pub use proxy::proxy_payload;
pub use upstream::{HttpUpstream, Upstream, UpstreamConfig, UpstreamResult};
pub use workflow::{StepOutcome, WorkflowRequest};

/// Common result alias for Pay-by-Bank operations.
pub type Result<T> = std::result::Result<T, PayByBankError>;
