//! Layer and layer-stack data model
//!
//! A layer is a reference to validator logic plus its curried static
//! parameters: `{program, params}`. The parameters are stored in canonical
//! encoding so that a layer's hash is a pure function of its structure. A
//! stack is a plain ordered sequence of layers, outermost first, innermost
//! last; it is a value, not a live object graph, which is what lets the
//! rate-limit validator rebuild and re-hash a stack description inside its
//! own evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::commitment::{self, ATOM_PREFIX};
use crate::condition::PuzzleHash;
use crate::errors::Result;
use crate::hash;
use crate::serialization;

/// 32-byte identity of a validator program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramId(pub [u8; 32]);

impl ProgramId {
    /// Wrap raw identity bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw identity bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "program:{}", hex::encode(self.0))
    }
}

/// Leaf hash of a single layer in the commitment tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerHash(pub [u8; 32]);

impl LayerHash {
    /// Wrap raw digest bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for LayerHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer:{}", hex::encode(self.0))
    }
}

/// One policy gate: validator identity plus curried configuration.
///
/// Two layers with the same program but different parameters are distinct
/// layers with distinct hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    program: ProgramId,
    params: Vec<u8>,
}

impl Layer {
    /// Bind `params` to `program`, encoding the parameters canonically.
    pub fn new<P: Serialize>(program: ProgramId, params: &P) -> Result<Self> {
        Ok(Self {
            program,
            params: serialization::to_vec(params)?,
        })
    }

    /// Build a layer from already-encoded parameter bytes.
    ///
    /// The bytes must be the canonical encoding of the parameters; nothing
    /// re-checks this, and a non-canonical encoding yields a different hash.
    pub fn from_encoded_params(program: ProgramId, params: Vec<u8>) -> Self {
        Self { program, params }
    }

    /// The validator program this layer references.
    pub fn program(&self) -> ProgramId {
        self.program
    }

    /// The canonical encoding of the curried parameters.
    pub fn params(&self) -> &[u8] {
        &self.params
    }

    /// Leaf hash of this layer: `H(0x01 ‖ program ‖ params)`.
    pub fn hash(&self) -> LayerHash {
        let mut h = hash::hasher();
        h.update(&[ATOM_PREFIX]);
        h.update(&self.program.0);
        h.update(&self.params);
        LayerHash(h.finalize())
    }
}

/// Ordered sequence of layers governing one resource.
///
/// Outermost first, innermost last. Fixed at resource-creation time; the
/// commitment binds the exact order, parameters, and length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack(Vec<Layer>);

impl LayerStack {
    /// Create a stack from layers in outermost-first order.
    pub fn new(layers: Vec<Layer>) -> Self {
        Self(layers)
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the stack has no layers. An empty stack never commits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the layers, outermost first.
    pub fn layers(&self) -> &[Layer] {
        &self.0
    }

    /// Leaf hashes of all layers, outermost first.
    pub fn layer_hashes(&self) -> Vec<LayerHash> {
        self.0.iter().map(Layer::hash).collect()
    }

    /// Commit this stack to its 32-byte puzzle hash.
    ///
    /// Pure: the same stack always commits to the same value. Stacks
    /// differing in order, parameters, or length commit to different values.
    pub fn commit(&self) -> Result<PuzzleHash> {
        commitment::commit_stack(self)
    }
}

impl From<Vec<Layer>> for LayerStack {
    fn from(layers: Vec<Layer>) -> Self {
        Self::new(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(tag: u8) -> ProgramId {
        ProgramId::new([tag; 32])
    }

    #[test]
    fn params_bind_into_layer_hash() {
        let a = Layer::new(program(1), &(100u64, 333u64)).unwrap();
        let b = Layer::new(program(1), &(100u64, 334u64)).unwrap();
        let a2 = Layer::new(program(1), &(100u64, 333u64)).unwrap();
        assert_ne!(a.hash(), b.hash());
        assert_eq!(a.hash(), a2.hash());
    }

    #[test]
    fn program_identity_binds_into_layer_hash() {
        let a = Layer::new(program(1), &0u64).unwrap();
        let b = Layer::new(program(2), &0u64).unwrap();
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn encoded_params_match_typed_construction() {
        let typed = Layer::new(program(7), &42u64).unwrap();
        let raw = Layer::from_encoded_params(
            program(7),
            crate::serialization::to_vec(&42u64).unwrap(),
        );
        assert_eq!(typed.hash(), raw.hash());
    }
}
