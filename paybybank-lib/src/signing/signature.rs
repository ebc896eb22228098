//! Signature computation over the canonical string.

use base64::Engine;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use crate::Result;

type HmacSha256 = Hmac<Sha256>;

/// Build the canonical string that gets signed.
///
/// `apiKey ‖ requestId ‖ timestamp`, followed by the serialized body when
/// one is present.
pub fn canonical_string(
    api_key: &str,
    request_id: &str,
    timestamp: &str,
    body: Option<&str>,
) -> String {
    let body = body.unwrap_or_default();
    let mut raw =
        String::with_capacity(api_key.len() + request_id.len() + timestamp.len() + body.len());
    raw.push_str(api_key);
    raw.push_str(request_id);
    raw.push_str(timestamp);
    raw.push_str(body);
    raw
}

/// Compute the signature over an already-serialized body.
///
/// Returns the standard base64 encoding of the raw HMAC-SHA256 digest.
///
/// # Example
///
/// ```
/// use paybybank_lib::signing::compute_signature_raw;
///
/// let a = compute_signature_raw("k1", "s1", "1700000000000-0a1b2c3d", "1700000000000", Some("{}"));
/// let b = compute_signature_raw("k1", "s1", "1700000000000-0a1b2c3d", "1700000000000", Some("{}"));
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 44);
/// ```
pub fn compute_signature_raw(
    api_key: &str,
    secret: &str,
    request_id: &str,
    timestamp: &str,
    body: Option<&str>,
) -> String {
    let raw = canonical_string(api_key, request_id, timestamp, body);
    sign_canonical(secret, &raw)
}

/// Compute the signature for a payload.
///
/// A `None` payload contributes nothing to the canonical string. Otherwise
/// the payload is serialized to compact JSON first; use
/// [`compute_signature_raw`] when the body string already exists.
pub fn compute_signature<T: Serialize + ?Sized>(
    api_key: &str,
    secret: &str,
    request_id: &str,
    timestamp: &str,
    payload: Option<&T>,
) -> Result<String> {
    let body = payload.map(serde_json::to_string).transpose()?;
    Ok(compute_signature_raw(
        api_key,
        secret,
        request_id,
        timestamp,
        body.as_deref(),
    ))
}

/// HMAC-SHA256 of `canonical` under `secret`, base64 encoded.
///
/// HMAC pads keys shorter than the 64-byte block and hashes longer ones, so
/// `new_from_slice` never returns `InvalidLength`. The secret may be empty
/// or arbitrarily long.
pub(crate) fn sign_canonical(secret: &str, canonical: &str) -> String {
    let mut mac = <HmacSha256 as KeyInit>::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(canonical.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}
