//! Signing-envelope construction.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;

use super::signature::{canonical_string, sign_canonical};
use crate::protocol::{
    AUTH_TOKEN_TYPE_HMAC, CONTENT_TYPE_JSON, HEADER_API_KEY, HEADER_AUTHORIZATION,
    HEADER_AUTH_TOKEN_TYPE, HEADER_CLIENT_REQUEST_ID, HEADER_CONTENT_TYPE, HEADER_TIMESTAMP,
};
use crate::Result;

/// A fully signed outbound request envelope.
///
/// Built fresh for every call and never reused. The body it carries is the
/// exact string that was signed and must be sent unmodified.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    api_key: String,
    timestamp: String,
    request_id: String,
    signature: String,
    canonical: String,
    body: Option<String>,
}

impl SignedRequest {
    /// Epoch milliseconds as decimal text.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The `Client-Request-Id` value.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// The `Authorization` value.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The string the signature was computed over.
    pub fn canonical_string(&self) -> &str {
        &self.canonical
    }

    /// The serialized body, if the request has one.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// The six envelope headers in wire order.
    pub fn headers(&self) -> [(&'static str, &str); 6] {
        [
            (HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON),
            (HEADER_API_KEY, self.api_key.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_CLIENT_REQUEST_ID, self.request_id.as_str()),
            (HEADER_AUTH_TOKEN_TYPE, AUTH_TOKEN_TYPE_HMAC),
            (HEADER_AUTHORIZATION, self.signature.as_str()),
        ]
    }

    /// Look up a single envelope header by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers()
            .into_iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

impl fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The canonical string and body embed the api key and payment data.
        f.debug_struct("SignedRequest")
            .field("timestamp", &self.timestamp)
            .field("request_id", &self.request_id)
            .field("body_len", &self.body.as_ref().map(String::len))
            .finish_non_exhaustive()
    }
}

/// Current epoch time in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Generate a `Client-Request-Id` for the given timestamp.
///
/// Format: `{timestamp}-{8 hex chars}`, the suffix drawn from 4 bytes of OS
/// randomness so that calls issued within the same millisecond still get
/// distinct ids.
pub fn generate_request_id(timestamp: &str) -> String {
    let mut suffix = [0u8; 4];
    OsRng.fill_bytes(&mut suffix);
    format!("{}-{}", timestamp, hex::encode(suffix))
}

/// Build the signing envelope for a payload at the current time.
///
/// `None` means the request has no body (GET); nothing is appended to the
/// canonical string in that case.
///
/// # Example
///
/// ```
/// use paybybank_lib::signing::build_headers;
/// use serde_json::json;
///
/// let signed = build_headers("k1", "s1", Some(&json!({"a": 1}))).unwrap();
/// assert_eq!(signed.header("Auth-Token-Type"), Some("HMAC"));
/// assert_eq!(signed.body(), Some(r#"{"a":1}"#));
/// assert!(signed.request_id().starts_with(signed.timestamp()));
/// ```
pub fn build_headers<T: Serialize + ?Sized>(
    api_key: &str,
    secret: &str,
    payload: Option<&T>,
) -> Result<SignedRequest> {
    let body = payload.map(serde_json::to_string).transpose()?;
    Ok(build_headers_at(api_key, secret, body, current_timestamp_ms()))
}

/// Build the signing envelope for an already-serialized body at a fixed time.
pub fn build_headers_at(
    api_key: &str,
    secret: &str,
    body: Option<String>,
    timestamp_ms: u64,
) -> SignedRequest {
    let timestamp = timestamp_ms.to_string();
    let request_id = generate_request_id(&timestamp);
    let canonical = canonical_string(api_key, &request_id, &timestamp, body.as_deref());
    let signature = sign_canonical(secret, &canonical);

    SignedRequest {
        api_key: api_key.to_string(),
        timestamp,
        request_id,
        signature,
        canonical,
        body,
    }
}
