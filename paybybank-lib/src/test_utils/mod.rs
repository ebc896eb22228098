//! Test utilities for Pay-by-Bank.
//!
//! This module provides:
//! - A recording mock upstream with scripted answers
//! - Fixtures for credentials and typical processor bodies
//! - Assertion helpers for outcomes and signatures
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paybybank_lib::test_utils::{RecordingUpstream, TestFixtures};
//! use paybybank_lib::PayByBank;
//!
//! let upstream = RecordingUpstream::responding(201, TestFixtures::customer_created("pc-9"));
//! let client = PayByBank::with_upstream(upstream.clone());
//!
//! let outcome = client.create_customer(&TestFixtures::credentials(), Default::default()).await;
//! assert!(outcome.success);
//! assert_eq!(upstream.call_count(), 1);
//! ```

mod assertions;
mod fixtures;
mod mock_upstream;

pub use assertions::{assert_signature_valid, assert_step_failed, assert_step_succeeded};
pub use fixtures::TestFixtures;
pub use mock_upstream::{RecordedRequest, RecordingUpstream};
