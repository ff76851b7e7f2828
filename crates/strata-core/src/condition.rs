//! Declared spend effects
//!
//! A spend asserts its effects as an ordered list of tagged conditions:
//! create an output, bind to a timestamp, require a signature. The ledger
//! enforces the conditions themselves; policy layers only inspect the list.
//! Order in the list matters only insofar as witnesses index into it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Result, StrataError};

/// 32-byte commitment governing a resource (its "puzzle hash").
///
/// Appears both as the identity of a stored resource and as the target of a
/// `CreateOutput` condition, which is what lets a policy compare the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PuzzleHash(pub [u8; 32]);

impl PuzzleHash {
    /// Wrap raw digest bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for PuzzleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ph:{}", hex::encode(self.0))
    }
}

/// 32-byte signer identity referenced by `RequireSignature`.
///
/// Opaque to this crate family; the ledger resolves it to a verification key
/// when it checks the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignerKey(pub [u8; 32]);

impl SignerKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "signer:{}", hex::encode(self.0))
    }
}

/// 32-byte digest of the message a signature must cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageHash(pub [u8; 32]);

impl MessageHash {
    /// Wrap raw digest bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for MessageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg:{}", hex::encode(self.0))
    }
}

/// Discriminant of a [`Condition`], used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionKind {
    /// `CreateOutput`
    CreateOutput,
    /// `AssertAbsoluteTime`
    AssertAbsoluteTime,
    /// `RequireSignature`
    RequireSignature,
    /// `Remark`
    Remark,
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConditionKind::CreateOutput => "create-output",
            ConditionKind::AssertAbsoluteTime => "assert-absolute-time",
            ConditionKind::RequireSignature => "require-signature",
            ConditionKind::Remark => "remark",
        };
        write!(f, "{name}")
    }
}

/// One declared effect of a spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Create a new resource governed by `puzzle_hash` holding `amount`.
    CreateOutput {
        /// Commitment of the policy stack governing the new resource
        puzzle_hash: PuzzleHash,
        /// Value transferred into the new resource, in mojos
        amount: u64,
    },

    /// Assert that chain time has reached `seconds` (unix seconds).
    ///
    /// The ledger refuses the spend until the assertion holds, which is what
    /// lets a validator trust the timestamp.
    AssertAbsoluteTime {
        /// Unix timestamp the spend is bound to
        seconds: u64,
    },

    /// Require a signature by `signer` over `message` for the spend to land.
    RequireSignature {
        /// Identity that must sign
        signer: SignerKey,
        /// Digest the signature must cover
        message: MessageHash,
    },

    /// Inert annotation; no gate or ledger rule interprets it.
    Remark {
        /// Arbitrary payload
        payload: Vec<u8>,
    },
}

impl Condition {
    /// Discriminant of this condition.
    pub fn kind(&self) -> ConditionKind {
        match self {
            Condition::CreateOutput { .. } => ConditionKind::CreateOutput,
            Condition::AssertAbsoluteTime { .. } => ConditionKind::AssertAbsoluteTime,
            Condition::RequireSignature { .. } => ConditionKind::RequireSignature,
            Condition::Remark { .. } => ConditionKind::Remark,
        }
    }

    /// Numeric opcode under the ledger's condition numbering.
    pub fn opcode(&self) -> u8 {
        match self {
            Condition::CreateOutput { .. } => 51,
            Condition::AssertAbsoluteTime { .. } => 81,
            Condition::RequireSignature { .. } => 50,
            Condition::Remark { .. } => 1,
        }
    }
}

/// Ordered list of conditions proposed by one spend.
///
/// Produced by the innermost authorization layer and observed read-only by
/// every gate outward of it. Exists only for the duration of one evaluation
/// pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionList(Vec<Condition>);

impl ConditionList {
    /// Create a list from conditions in proposal order.
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self(conditions)
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a condition.
    pub fn push(&mut self, condition: Condition) {
        self.0.push(condition);
    }

    /// Borrow the conditions as a slice.
    pub fn as_slice(&self) -> &[Condition] {
        &self.0
    }

    /// Checked indexing; out of range is fatal, not a rejection.
    pub fn at(&self, index: usize) -> Result<&Condition> {
        self.0
            .get(index)
            .ok_or(StrataError::ConditionIndexOutOfRange {
                index,
                len: self.0.len(),
            })
    }

    /// The `CreateOutput` at `index`, or a fatal error if the index is out
    /// of range or names a condition of another kind.
    pub fn create_output_at(&self, index: usize) -> Result<(PuzzleHash, u64)> {
        match self.at(index)? {
            Condition::CreateOutput {
                puzzle_hash,
                amount,
            } => Ok((*puzzle_hash, *amount)),
            other => Err(StrataError::WrongConditionKind {
                index,
                expected: ConditionKind::CreateOutput,
                found: other.kind(),
            }),
        }
    }

    /// The `AssertAbsoluteTime` at `index`, with the same fatal semantics.
    pub fn absolute_time_at(&self, index: usize) -> Result<u64> {
        match self.at(index)? {
            Condition::AssertAbsoluteTime { seconds } => Ok(*seconds),
            other => Err(StrataError::WrongConditionKind {
                index,
                expected: ConditionKind::AssertAbsoluteTime,
                found: other.kind(),
            }),
        }
    }
}

impl From<Vec<Condition>> for ConditionList {
    fn from(conditions: Vec<Condition>) -> Self {
        Self::new(conditions)
    }
}

impl<'a> IntoIterator for &'a ConditionList {
    type Item = &'a Condition;
    type IntoIter = std::slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
