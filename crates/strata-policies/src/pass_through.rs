//! Pass-through gate
//!
//! Approves any condition list. Useful as a placeholder outer layer while a
//! stack is being designed, and in tests that need a gate with no policy of
//! its own.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use strata_core::{hash, ConditionList, Layer, ProgramId, Result};

use crate::contract::Verdict;

/// Identity of the pass-through validator program.
pub static PROGRAM_ID: Lazy<ProgramId> =
    Lazy::new(|| ProgramId::new(hash::hash(b"strata/policy/pass-through/v1")));

/// Gate that approves everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassThroughPolicy;

impl PassThroughPolicy {
    /// The committed form of this gate.
    pub fn layer(&self) -> Result<Layer> {
        Layer::new(*PROGRAM_ID, &0u64)
    }

    /// Approve unconditionally.
    pub fn validate(&self, _conditions: &ConditionList) -> Result<Verdict> {
        Ok(Verdict::Approved)
    }
}
