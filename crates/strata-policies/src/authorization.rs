//! Innermost authorization layer
//!
//! The one condition-producing layer in the closed set. Its curried
//! parameter is the signer identity; its witness is the condition list the
//! spender proposes. Producing forwards the proposed conditions with a
//! `RequireSignature` appended that binds the signer to the canonical hash
//! of the proposal, so the ledger will only land the spend if the signer
//! actually approved exactly these conditions. Verifying that signature is
//! the ledger's job, not this crate's.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use strata_core::{
    hash, serialization, Condition, ConditionList, Layer, MessageHash, ProgramId, Result,
    SignerKey,
};

/// Identity of the authorization validator program.
pub static PROGRAM_ID: Lazy<ProgramId> =
    Lazy::new(|| ProgramId::new(hash::hash(b"strata/policy/authorization/v1")));

/// Innermost producer bound to one signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationPolicy {
    signer: SignerKey,
}

/// The spender's proposal: the conditions this spend should assert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationWitness {
    /// Proposed conditions, in final order
    pub conditions: Vec<Condition>,
}

impl AuthorizationPolicy {
    /// Bind the layer to a signer identity.
    pub fn new(signer: SignerKey) -> Self {
        Self { signer }
    }

    /// The identity that must sign every spend.
    pub fn signer(&self) -> SignerKey {
        self.signer
    }

    /// The committed form of this layer.
    pub fn layer(&self) -> Result<Layer> {
        Layer::new(*PROGRAM_ID, &self.signer)
    }

    /// The digest the signer must cover for a given proposal.
    pub fn spend_message(conditions: &[Condition]) -> Result<MessageHash> {
        Ok(MessageHash::new(serialization::hash_canonical(
            &conditions,
        )?))
    }

    /// Produce the condition list for evaluation: the proposal as given,
    /// with the signature requirement appended last.
    pub fn produce(&self, witness: &AuthorizationWitness) -> Result<ConditionList> {
        let message = Self::spend_message(&witness.conditions)?;
        let mut conditions = ConditionList::new(witness.conditions.clone());
        conditions.push(Condition::RequireSignature {
            signer: self.signer,
            message,
        });
        Ok(conditions)
    }
}
