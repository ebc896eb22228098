//! HMAC request signing.
//!
//! Every call to the processor carries a six-header signing envelope:
//!
//! ```text
//! Content-Type:      application/json
//! Api-Key:           <apiKey>
//! Timestamp:         <epoch millis>
//! Client-Request-Id: <epoch millis>-<8 hex chars>
//! Auth-Token-Type:   HMAC
//! Authorization:     base64(HMAC-SHA256(secret, apiKey ‖ requestId ‖ timestamp ‖ body))
//! ```
//!
//! The body component is the compact JSON serialization of the payload and
//! is omitted entirely for calls without a payload (GET). The processor
//! recomputes the signature from the bytes it receives, so the serialized
//! string is produced once, signed, and then sent verbatim as the request
//! body. Serializing twice would risk a byte-level mismatch that the
//! processor reports only as a generic 401.

mod headers;
mod signature;

pub use headers::{
    build_headers, build_headers_at, current_timestamp_ms, generate_request_id, SignedRequest,
};
pub use signature::{canonical_string, compute_signature, compute_signature_raw};
