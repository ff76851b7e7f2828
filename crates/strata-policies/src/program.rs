//! Stack composition, witness assembly, and evaluation
//!
//! `compose` turns an ordered list of policy layers into a committed
//! program whose identity is the stack commitment. `SpendWitness::assemble`
//! pairs the stack with one witness per layer, outermost first. Evaluation
//! has the innermost layer produce the condition list, then walks the gates
//! outward; the first rejection ends the spend, and any fatal error aborts
//! it before a verdict is reached.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use strata_core::{ConditionList, LayerStack, PuzzleHash, Result, StrataError};

use crate::contract::{LayerWitness, PolicyLayer, Verdict};

/// A policy stack fixed under its commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedProgram {
    layers: Vec<PolicyLayer>,
    commitment: PuzzleHash,
}

/// Compose a stack of policy layers into a committed program.
///
/// The commitment is a pure function of the ordered layer identities and
/// their curried parameters; composing the same layers twice yields the
/// same commitment. An empty stack is fatal; a resource carries at least
/// its authorization layer.
pub fn compose(layers: Vec<PolicyLayer>) -> Result<CommittedProgram> {
    if layers.is_empty() {
        return Err(StrataError::EmptyStack);
    }

    let stack = LayerStack::new(
        layers
            .iter()
            .map(PolicyLayer::layer)
            .collect::<Result<Vec<_>>>()?,
    );
    let commitment = stack.commit()?;
    debug!(layers = layers.len(), %commitment, "composed policy stack");

    Ok(CommittedProgram { layers, commitment })
}

impl CommittedProgram {
    /// The commitment a ledger stores for resources governed by this stack.
    pub fn commitment(&self) -> PuzzleHash {
        self.commitment
    }

    /// The layers, outermost first.
    pub fn layers(&self) -> &[PolicyLayer] {
        &self.layers
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false; `compose` refuses empty stacks.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Evaluate a spend attempt against this program.
    ///
    /// Deterministic and side-effect-free: re-evaluating the same witness
    /// any number of times yields the same outcome.
    pub fn evaluate(&self, witness: &SpendWitness) -> Result<EvalOutcome> {
        if witness.len() != self.layers.len() {
            return Err(StrataError::WitnessLengthMismatch {
                expected: self.layers.len(),
                actual: witness.len(),
            });
        }

        let innermost = self.layers.len() - 1;
        let conditions = self.layers[innermost].produce(innermost, witness.entry(innermost))?;
        trace!(
            conditions = conditions.len(),
            "innermost layer produced condition list"
        );

        for index in (0..innermost).rev() {
            trace!(layer = index, kind = self.layers[index].kind_name(), "gating");
            match self.layers[index].validate(index, &conditions, witness.entry(index))? {
                Verdict::Approved => {}
                Verdict::Rejected => {
                    debug!(layer = index, "spend rejected");
                    return Ok(EvalOutcome::Rejected { layer_index: index });
                }
            }
        }

        Ok(EvalOutcome::Approved(conditions))
    }
}

/// Ordered per-layer witness list for one spend attempt.
///
/// Constructed fresh per attempt and discarded afterward; nothing here
/// persists or feeds the commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendWitness {
    entries: Vec<LayerWitness>,
}

impl SpendWitness {
    /// Pair witness entries 1:1 with a program's layers, outermost first.
    ///
    /// A length mismatch is a caller error, caught here before any
    /// evaluation begins.
    pub fn assemble(program: &CommittedProgram, entries: Vec<LayerWitness>) -> Result<Self> {
        if entries.len() != program.len() {
            return Err(StrataError::WitnessLengthMismatch {
                expected: program.len(),
                actual: entries.len(),
            });
        }
        Ok(Self { entries })
    }

    /// Number of witness entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The witness for the layer at `index` (outermost first).
    pub(crate) fn entry(&self, index: usize) -> &LayerWitness {
        &self.entries[index]
    }
}

/// Result of evaluating a whole spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvalOutcome {
    /// Every layer approved; these are the conditions the spend asserts.
    Approved(ConditionList),
    /// A gate's proof or schedule check failed.
    Rejected {
        /// Position of the rejecting layer, outermost first
        layer_index: usize,
    },
}

impl EvalOutcome {
    /// Whether the spend was approved.
    pub fn is_approved(&self) -> bool {
        matches!(self, EvalOutcome::Approved(_))
    }

    /// The approved condition list, if any.
    pub fn conditions(&self) -> Option<&ConditionList> {
        match self {
            EvalOutcome::Approved(conditions) => Some(conditions),
            EvalOutcome::Rejected { .. } => None,
        }
    }
}
