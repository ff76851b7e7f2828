//! Unified error system for Strata
//!
//! A single error enum covers every fatal outcome in the crate family. A
//! fatal error means the witness or stack is malformed relative to what it
//! claims to describe; it is distinct from a policy rejection, which is an
//! ordinary verdict and never surfaces as an error.

use serde::{Deserialize, Serialize};

use crate::condition::ConditionKind;

/// Fatal evaluation and construction errors.
///
/// Evaluation aborts on the first fatal error; remaining layers are never
/// consulted, since a malformed witness cannot be meaningfully interpreted
/// by them either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum StrataError {
    /// A stack must contain at least one layer.
    #[error("empty stack")]
    EmptyStack,

    /// The per-layer witness list does not map 1:1 onto the stack.
    #[error("witness/stack length mismatch: stack has {expected} layers, witness has {actual}")]
    WitnessLengthMismatch {
        /// Number of layers in the stack
        expected: usize,
        /// Number of witness entries supplied
        actual: usize,
    },

    /// A witness entry is of the wrong variant for its layer.
    #[error("layer {layer_index} expects a {expected} witness, got {found}")]
    WitnessKindMismatch {
        /// Position of the layer in the stack, outermost first
        layer_index: usize,
        /// Witness variant the layer consumes
        expected: String,
        /// Witness variant actually supplied
        found: String,
    },

    /// A witness indexed past the end of the condition list.
    #[error("condition index {index} out of range for list of length {len}")]
    ConditionIndexOutOfRange {
        /// Index claimed by the witness
        index: usize,
        /// Length of the condition list
        len: usize,
    },

    /// The indexed condition is not of the kind the witness claims.
    #[error("condition {index} is {found}, expected {expected}")]
    WrongConditionKind {
        /// Index of the offending condition
        index: usize,
        /// Kind the witness claims to reference
        expected: ConditionKind,
        /// Kind actually found at that index
        found: ConditionKind,
    },

    /// The witness timestamp disagrees with the declared time assertion.
    #[error("time assertion mismatch: condition asserts {declared}, witness claims {witness}")]
    TimeAssertionMismatch {
        /// Timestamp in the `AssertAbsoluteTime` condition
        declared: u64,
        /// Timestamp the witness claims as now
        witness: u64,
    },

    /// A witness indexed past the end of its continuation-hash list.
    #[error("continuation index {index} out of range for list of length {len}")]
    ContinuationIndexOutOfRange {
        /// Index claimed by the witness
        index: usize,
        /// Length of the continuation-hash list
        len: usize,
    },

    /// The innermost layer must produce the condition list; this one cannot.
    #[error("innermost layer {kind} cannot produce conditions")]
    InnermostNotProducer {
        /// Kind of the offending layer
        kind: String,
    },

    /// A condition-producing layer appeared outside the innermost position.
    #[error("producing layer {kind} at position {layer_index} must be innermost")]
    ProducerNotInnermost {
        /// Position of the layer in the stack, outermost first
        layer_index: usize,
        /// Kind of the offending layer
        kind: String,
    },

    /// A static parameter was rejected at construction time.
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        /// What was wrong with the parameter
        message: String,
    },

    /// Canonical encoding or decoding failed.
    #[error("serialization error: {message}")]
    Serialization {
        /// Underlying encoder/decoder message
        message: String,
    },
}

impl StrataError {
    /// Create an invalid-parameter error
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Standard result type for Strata operations
pub type Result<T> = std::result::Result<T, StrataError>;
