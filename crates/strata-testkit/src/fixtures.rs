//! Condition fixtures and tracing setup

use std::sync::Once;

use strata_core::{Condition, PuzzleHash};

static TRACING: Once = Once::new();

/// Install a fmt tracing subscriber honoring `RUST_LOG`, once per process.
///
/// Tests that want evaluator output call this first; repeated calls are
/// no-ops.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .init();
    });
}

/// A recognizable puzzle hash filled with one byte.
pub fn puzzle_hash(tag: u8) -> PuzzleHash {
    PuzzleHash::new([tag; 32])
}

/// The proposal shape most tests start from: two outputs a factor proof can
/// target plus an inert remark.
pub fn basic_outputs() -> Vec<Condition> {
    vec![
        Condition::CreateOutput {
            puzzle_hash: puzzle_hash(0),
            amount: 1000,
        },
        Condition::CreateOutput {
            puzzle_hash: puzzle_hash(0),
            amount: 1001,
        },
        Condition::Remark {
            payload: b"junk".to_vec(),
        },
    ]
}
