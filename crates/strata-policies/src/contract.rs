//! Layer contract
//!
//! Every policy layer implements the same shape: given the declared
//! conditions of the spend and a layer-specific witness, approve or reject.
//! The innermost layer is special in that it produces the condition list
//! the gates observe; placing a producer anywhere else, or a gate innermost,
//! is a malformed stack and therefore fatal.

use serde::{Deserialize, Serialize};

use strata_core::{ConditionList, Layer, Result, StrataError};

use crate::authorization::{AuthorizationPolicy, AuthorizationWitness};
use crate::composite_amount::{CompositeAmountPolicy, CompositeAmountWitness};
use crate::pass_through::PassThroughPolicy;
use crate::rate_limit::{RateLimitPolicy, RateLimitWitness};

/// Outcome of one layer's decision.
///
/// `Rejected` is an ordinary, expected outcome: a proof or schedule check
/// that decidably failed. Malformed witnesses never reach a verdict; they
/// surface as [`StrataError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Policy satisfied; evaluation continues outward.
    Approved,
    /// Proof or schedule check failed; the spend does not go through.
    Rejected,
}

impl Verdict {
    /// Whether this verdict lets the spend continue.
    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved)
    }
}

/// One layer of a policy stack: the closed set of validator kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyLayer {
    /// Innermost producer bound to a signer identity
    Authorization(AuthorizationPolicy),
    /// Gate proving a chosen output amount is composite
    CompositeAmount(CompositeAmountPolicy),
    /// Gate enforcing a time-indexed withdrawal schedule
    RateLimit(RateLimitPolicy),
    /// Gate that approves everything
    PassThrough(PassThroughPolicy),
}

/// Spend-time witness for one layer, matching [`PolicyLayer`] variant for
/// variant. Never part of the commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerWitness {
    /// Proposed conditions for the innermost authorization layer
    Authorization(AuthorizationWitness),
    /// Factor proof for the composite-amount gate
    CompositeAmount(CompositeAmountWitness),
    /// Schedule proof for the rate-limit gate
    RateLimit(RateLimitWitness),
    /// The pass-through gate consumes no witness data
    PassThrough,
}

impl LayerWitness {
    /// Stable name of this witness variant, for error reporting.
    pub fn kind_name(&self) -> &'static str {
        match self {
            LayerWitness::Authorization(_) => "authorization",
            LayerWitness::CompositeAmount(_) => "composite-amount",
            LayerWitness::RateLimit(_) => "rate-limit",
            LayerWitness::PassThrough => "pass-through",
        }
    }
}

impl PolicyLayer {
    /// Stable name of this layer kind, for error reporting.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PolicyLayer::Authorization(_) => "authorization",
            PolicyLayer::CompositeAmount(_) => "composite-amount",
            PolicyLayer::RateLimit(_) => "rate-limit",
            PolicyLayer::PassThrough(_) => "pass-through",
        }
    }

    /// The committed `{program, params}` form of this layer.
    pub fn layer(&self) -> Result<Layer> {
        match self {
            PolicyLayer::Authorization(policy) => policy.layer(),
            PolicyLayer::CompositeAmount(policy) => policy.layer(),
            PolicyLayer::RateLimit(policy) => policy.layer(),
            PolicyLayer::PassThrough(policy) => policy.layer(),
        }
    }

    /// Produce the condition list. Only the innermost layer does this, and
    /// only the authorization layer can.
    pub fn produce(&self, layer_index: usize, witness: &LayerWitness) -> Result<ConditionList> {
        match (self, witness) {
            (PolicyLayer::Authorization(policy), LayerWitness::Authorization(w)) => {
                policy.produce(w)
            }
            (PolicyLayer::Authorization(_), other) => Err(StrataError::WitnessKindMismatch {
                layer_index,
                expected: "authorization".to_string(),
                found: other.kind_name().to_string(),
            }),
            (layer, _) => Err(StrataError::InnermostNotProducer {
                kind: layer.kind_name().to_string(),
            }),
        }
    }

    /// Gate the declared conditions. Only non-innermost layers do this.
    pub fn validate(
        &self,
        layer_index: usize,
        conditions: &ConditionList,
        witness: &LayerWitness,
    ) -> Result<Verdict> {
        match (self, witness) {
            (PolicyLayer::CompositeAmount(policy), LayerWitness::CompositeAmount(w)) => {
                policy.validate(conditions, w)
            }
            (PolicyLayer::RateLimit(policy), LayerWitness::RateLimit(w)) => {
                policy.validate(conditions, w)
            }
            (PolicyLayer::PassThrough(policy), LayerWitness::PassThrough) => {
                policy.validate(conditions)
            }
            (PolicyLayer::Authorization(_), _) => Err(StrataError::ProducerNotInnermost {
                layer_index,
                kind: "authorization".to_string(),
            }),
            (layer, witness) => Err(StrataError::WitnessKindMismatch {
                layer_index,
                expected: layer.kind_name().to_string(),
                found: witness.kind_name().to_string(),
            }),
        }
    }
}
