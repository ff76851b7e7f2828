//! Strata Policies - Composable Spend Gates
//!
//! The closed set of policy layers that can appear in a committed stack,
//! plus the machinery to compose a stack into a committed program and
//! evaluate it against a spend witness.
//!
//! The set of layer kinds is small and fixed by the commitment scheme;
//! adding a kind is an explicit, versioned extension of the protocol, not a
//! runtime plugin. That is why the layer contract is a tagged enum rather
//! than open-ended dynamic dispatch.

#![forbid(unsafe_code)]

/// Innermost condition-producing layer bound to a signer
pub mod authorization;

/// Composite-amount proof gate
pub mod composite_amount;

/// Layer contract: the closed layer and witness sets
pub mod contract;

/// Pass-through gate that approves everything
pub mod pass_through;

/// Stack composition, witness assembly, and evaluation
pub mod program;

/// Interval-based rate-limit gate
pub mod rate_limit;

pub use authorization::{AuthorizationPolicy, AuthorizationWitness};
pub use composite_amount::{CompositeAmountPolicy, CompositeAmountWitness};
pub use contract::{LayerWitness, PolicyLayer, Verdict};
pub use pass_through::PassThroughPolicy;
pub use program::{compose, CommittedProgram, EvalOutcome, SpendWitness};
pub use rate_limit::{RateLimitParams, RateLimitPolicy, RateLimitWitness};
