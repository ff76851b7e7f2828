//! Strata Testkit
//!
//! Deterministic key material, condition-list fixtures, and tracing setup
//! shared by the unit and integration test suites. Nothing here belongs in
//! production code paths.

#![forbid(unsafe_code)]

/// Condition and stack fixtures
pub mod fixtures;

/// Deterministic ed25519 key fixtures
pub mod keys;

pub use fixtures::{basic_outputs, init_test_tracing, puzzle_hash};
pub use keys::KeyFixture;
