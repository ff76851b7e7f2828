//! Strata Core - Committed Spend-Policy Foundation
//!
//! This crate provides the data model and commitment scheme for composed
//! spend policies: the condition vocabulary a spend may assert, the ordered
//! layer stack that gates a resource, and the tree-hash that binds a stack
//! into a single 32-byte commitment.
//!
//! Everything here is a pure value computation. There is no I/O, no global
//! state, and no caching; `commit` called twice on the same stack returns
//! identical bytes, on any machine, in any call order.

#![forbid(unsafe_code)]

/// Declared spend effects and the ordered condition list
pub mod condition;

/// Unified error handling
pub mod errors;

/// Pure synchronous hashing
pub mod hash;

/// Layer and layer-stack data model
pub mod layer;

/// Commitment tree-hash combinator
pub mod commitment;

/// DAG-CBOR serialization (canonical format)
pub mod serialization;

pub use condition::{Condition, ConditionKind, ConditionList, MessageHash, PuzzleHash, SignerKey};
pub use errors::{Result, StrataError};
pub use layer::{Layer, LayerHash, LayerStack, ProgramId};

pub use commitment::{commit_layer_hashes, META_PROGRAM_ID};
