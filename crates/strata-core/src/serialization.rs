//! DAG-CBOR serialization for Strata types
//!
//! DAG-CBOR is the canonical encoding for static layer parameters and
//! anything else that feeds a hash: it is deterministic and
//! order-preserving, so structurally equal values always encode to
//! byte-identical output. Commitment injectivity in [`crate::commitment`]
//! depends on that property.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, StrataError};
use crate::hash;

/// Serialize a value to canonical DAG-CBOR bytes.
pub fn to_vec<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_ipld_dagcbor::to_vec(value).map_err(|e| StrataError::serialization(e.to_string()))
}

/// Deserialize canonical DAG-CBOR bytes.
pub fn from_slice<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T> {
    serde_ipld_dagcbor::from_slice(bytes).map_err(|e| StrataError::serialization(e.to_string()))
}

/// Serialize to canonical bytes and hash the result.
pub fn hash_canonical<T: Serialize>(value: &T) -> Result<[u8; 32]> {
    let bytes = to_vec(value)?;
    Ok(hash::hash(&bytes))
}
