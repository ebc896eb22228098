//! Processor protocol conventions.
//!
//! This module is the single source of truth for:
//! - Versioned endpoint paths on the processor
//! - Names of the six signing-envelope headers
//! - Fixed literals the processor expects in payloads
//!
//! # Endpoints
//!
//! | Operation              | Method | Path                                              |
//! |------------------------|--------|---------------------------------------------------|
//! | Charge / probe         | POST   | `/payments/v1/charges`                            |
//! | Customer profile       | POST   | `/payments-vas/v1/tokens`                         |
//! | Nonce inquiry          | POST   | `/payments-vas/v1/tokens`                         |
//! | Provider credentials   | POST   | `/payments-vas/v1/security/provider-credentials`  |

mod paths;

pub use paths::*;

/// `Content-Type` header name.
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// `Api-Key` header name.
pub const HEADER_API_KEY: &str = "Api-Key";
/// `Timestamp` header name.
pub const HEADER_TIMESTAMP: &str = "Timestamp";
/// `Client-Request-Id` header name.
pub const HEADER_CLIENT_REQUEST_ID: &str = "Client-Request-Id";
/// `Auth-Token-Type` header name.
pub const HEADER_AUTH_TOKEN_TYPE: &str = "Auth-Token-Type";
/// `Authorization` header name.
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// Value of the `Auth-Token-Type` header.
pub const AUTH_TOKEN_TYPE_HMAC: &str = "HMAC";
/// Value of the `Content-Type` header.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Token provider and token source for Pay-by-Bank instruments.
pub const TOKEN_PROVIDER: &str = "FISERV_PAY_BY_BANK";
/// Source type of a tokenized payment instrument.
pub const SOURCE_TYPE_PAYMENT_TOKEN: &str = "PaymentToken";
/// Source type of the check instrument used by the connectivity probe.
pub const SOURCE_TYPE_PAYMENT_CHECK: &str = "PaymentCheck";
/// Operation type for customer profile creation.
pub const OPERATION_CREATE: &str = "CREATE";
/// Transaction origin for charges.
pub const ORIGIN_ECOM: &str = "ECOM";
/// Currency of every charge.
pub const CURRENCY_USD: &str = "USD";
/// Prefix of generated merchant customer ids.
pub const MERCHANT_CUSTOMER_ID_PREFIX: &str = "CUST-";
