//! Composite-amount proof gate
//!
//! Proves that a chosen output's amount is composite, a product of two
//! integers each strictly greater than one, without the evaluator doing
//! any factoring itself. The spender supplies the factors as a witness;
//! the gate only multiplies and compares.
//!
//! The `> 1` constraint is what makes the proof mean anything: allowing a
//! factor of one would let `1 × amount` "prove" any amount composite.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use strata_core::{hash, ConditionList, Layer, ProgramId, Result};

use crate::contract::Verdict;

/// Identity of the composite-amount validator program.
pub static PROGRAM_ID: Lazy<ProgramId> =
    Lazy::new(|| ProgramId::new(hash::hash(b"strata/policy/composite-amount/v1")));

/// Composite-amount gate. Carries no configuration; its curried parameter
/// slot is a fixed zero, so every instance commits identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeAmountPolicy;

/// Factor proof supplied at spend time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeAmountWitness {
    /// Index of the `CreateOutput` condition whose amount is being proven
    pub condition_index: usize,
    /// First claimed factor
    pub factor_1: u64,
    /// Second claimed factor
    pub factor_2: u64,
}

impl CompositeAmountPolicy {
    /// The committed form of this gate.
    pub fn layer(&self) -> Result<Layer> {
        Layer::new(*PROGRAM_ID, &0u64)
    }

    /// Check the factor proof against the indexed output.
    ///
    /// Indexing a condition that is not a `CreateOutput` is fatal: the
    /// witness claims to reference an output and does not. A wrong product
    /// or a trivial factor is an ordinary rejection.
    pub fn validate(
        &self,
        conditions: &ConditionList,
        witness: &CompositeAmountWitness,
    ) -> Result<Verdict> {
        let (_, amount) = conditions.create_output_at(witness.condition_index)?;

        if witness.factor_1 <= 1 || witness.factor_2 <= 1 {
            return Ok(Verdict::Rejected);
        }

        // Overflowing products cannot equal any valid amount.
        match witness.factor_1.checked_mul(witness.factor_2) {
            Some(product) if product == amount => Ok(Verdict::Approved),
            _ => Ok(Verdict::Rejected),
        }
    }
}
