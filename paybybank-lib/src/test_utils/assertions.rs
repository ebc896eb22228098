//! Test assertions and verification helpers.

use super::RecordedRequest;
use crate::errors::ErrorKind;
use crate::signing::compute_signature_raw;
use crate::workflow::StepOutcome;

/// Assert that a step succeeded with the given status.
///
/// # Panics
/// Panics if the outcome is a failure or the status differs.
pub fn assert_step_succeeded(outcome: &StepOutcome, http_status: u16) {
    assert!(
        outcome.success,
        "Step should have succeeded, got {:?}: {:?}",
        outcome.error_kind, outcome.message
    );
    assert_eq!(outcome.http_status, http_status, "Unexpected HTTP status");
}

/// Assert that a step failed with the given classification.
///
/// # Panics
/// Panics if the outcome is a success or the kind differs.
pub fn assert_step_failed(outcome: &StepOutcome, kind: ErrorKind) {
    assert!(!outcome.success, "Step should have failed");
    assert_eq!(outcome.error_kind, kind, "Unexpected error kind");
    assert!(outcome.message.is_some(), "Failure should carry a message");
}

/// Assert that a recorded request's signature matches its headers and body.
///
/// # Panics
/// Panics if the signature cannot be reproduced.
pub fn assert_signature_valid(request: &RecordedRequest, api_key: &str, secret: &str) {
    let expected = compute_signature_raw(
        api_key,
        secret,
        &request.request_id,
        &request.timestamp,
        request.body.as_deref(),
    );
    assert_eq!(
        request.signature, expected,
        "Signature does not match request {}",
        request.request_id
    );
}
