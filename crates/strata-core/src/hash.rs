//! Pure synchronous hashing for commitments
//!
//! Hashing here is a pure, deterministic operation with no effect context:
//! the same bytes always produce the same digest. The algorithm is selected
//! once, at compile time, through the `ALGORITHM` constant; call sites go
//! through [`hash`] and [`hasher`] and never name the algorithm directly,
//! so a future algorithm change is a one-line edit.
//!
//! Current algorithm: SHA-256 (32-byte output).

use sha2::{Digest, Sha256};
use std::fmt;

/// Trait for the digest algorithm backing all commitments.
pub trait HashAlgorithm: Send + Sync + fmt::Debug {
    /// Hash arbitrary bytes to a 32-byte digest.
    fn hash(&self, data: &[u8]) -> [u8; 32];

    /// Create an incremental hasher for multi-part input.
    fn hasher(&self) -> Box<dyn Hasher>;
}

/// Incremental hashing of multi-part input.
pub trait Hasher: Send {
    /// Feed more data into the hash computation.
    fn update(&mut self, data: &[u8]);

    /// Consume the hasher and return the 32-byte digest.
    fn finalize(self: Box<Self>) -> [u8; 32];
}

/// SHA-256 implementation of [`HashAlgorithm`].
#[derive(Debug, Clone, Copy)]
pub struct Sha256Algorithm;

impl HashAlgorithm for Sha256Algorithm {
    fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    fn hasher(&self) -> Box<dyn Hasher> {
        Box::new(Sha256Hasher(Sha256::new()))
    }
}

struct Sha256Hasher(Sha256);

impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> [u8; 32] {
        self.0.finalize().into()
    }
}

/// The digest algorithm used for every commitment in the system.
///
/// Single source of truth. Changing this constant changes every layer hash
/// and stack commitment, so it is part of the external compatibility
/// contract, not a tuning knob.
pub const ALGORITHM: Sha256Algorithm = Sha256Algorithm;

/// Hash bytes with the system algorithm.
#[inline]
pub fn hash(data: &[u8]) -> [u8; 32] {
    ALGORITHM.hash(data)
}

/// Create an incremental hasher using the system algorithm.
#[inline]
pub fn hasher() -> Box<dyn Hasher> {
    ALGORITHM.hasher()
}
