//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for
//! quick setup. Import everything with:
//!
//! ```rust,ignore
//! use paybybank_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Client: `PayByBank`, `Credentials`, `UpstreamConfig`
//! - Error types: `PayByBankError`, `ErrorKind`, `Result`
//! - Requests and results for every operation
//! - Upstream seam: `Upstream`, `HttpUpstream`

// Client
pub use crate::client::PayByBank;
pub use crate::credentials::{Credentials, Requirement};

// Error handling
pub use crate::errors::{ErrorKind, PayByBankError};
pub use crate::Result;

// Upstream
pub use crate::upstream::{HttpMethod, HttpUpstream, Upstream, UpstreamConfig, UpstreamResult};

// Requests
pub use crate::workflow::{
    ChargeRequest, CreateCustomerRequest, NonceInquiryRequest, ProviderCredentialsRequest,
    ProxyRequest, WorkflowRequest,
};

// Results
pub use crate::health::{service_health, ConnectionReport, ServiceHealth};
pub use crate::workflow::StepOutcome;
