//! Commitment tree-hash combinator
//!
//! A stack commits to a single 32-byte value through a right-associated
//! pairwise fold over its layer hashes, wrapped once more with the meta
//! interpreter identity. Domain prefixes keep leaves and interior nodes in
//! disjoint hash domains, so structurally different stacks never encode to
//! equal trees:
//!
//! ```text
//! leaf(layer)   = H(0x01 ‖ program ‖ params)
//! nil           = H(0x01)
//! list(h, rest) = H(0x02 ‖ h ‖ rest)
//! commit(stack) = H(0x02 ‖ H(0x01 ‖ META_PROGRAM_ID) ‖ list-fold of stack)
//! ```
//!
//! The prefix bytes and fold shape follow the tree-hash of the deployed
//! scheme this crate interoperates with; they are a fixed external contract,
//! not a local design choice.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::condition::PuzzleHash;
use crate::errors::{Result, StrataError};
use crate::hash;
use crate::layer::{LayerHash, LayerStack, ProgramId};

/// Domain prefix for leaf (atom) hashes.
pub const ATOM_PREFIX: u8 = 0x01;

/// Domain prefix for interior (pair) hashes.
pub const PAIR_PREFIX: u8 = 0x02;

/// Identity of the meta interpreter that runs a committed stack.
///
/// Folded into every commitment so that a bare layer-list hash can never
/// collide with a full resource commitment.
pub static META_PROGRAM_ID: Lazy<ProgramId> =
    Lazy::new(|| ProgramId(hash::hash(b"strata/meta/validating-stack/v1")));

/// Terminator of the layer-list fold: the hash of the empty atom.
static NIL_HASH: Lazy<[u8; 32]> = Lazy::new(|| hash::hash(&[ATOM_PREFIX]));

fn atom(bytes: &[u8]) -> [u8; 32] {
    let mut h = hash::hasher();
    h.update(&[ATOM_PREFIX]);
    h.update(bytes);
    h.finalize()
}

fn pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut h = hash::hasher();
    h.update(&[PAIR_PREFIX]);
    h.update(left);
    h.update(right);
    h.finalize()
}

/// Commit a stack given only its layer hashes, outermost first.
///
/// This is the entry point validators use to recompute an expected
/// commitment from witness-supplied hashes without materializing the layers
/// themselves. An empty list is fatal: a resource must carry at least its
/// authorization layer.
pub fn commit_layer_hashes(meta: ProgramId, layer_hashes: &[LayerHash]) -> Result<PuzzleHash> {
    if layer_hashes.is_empty() {
        return Err(StrataError::EmptyStack);
    }

    let mut acc = *NIL_HASH;
    for layer_hash in layer_hashes.iter().rev() {
        acc = pair(&layer_hash.0, &acc);
    }

    Ok(PuzzleHash(pair(&atom(&meta.0), &acc)))
}

/// Commit a full stack under the system meta interpreter.
pub(crate) fn commit_stack(stack: &LayerStack) -> Result<PuzzleHash> {
    let commitment = commit_layer_hashes(*META_PROGRAM_ID, &stack.layer_hashes())?;
    debug!(
        layers = stack.len(),
        commitment = %commitment,
        "committed layer stack"
    );
    Ok(commitment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use assert_matches::assert_matches;

    fn layer(program_tag: u8, param: u64) -> Layer {
        Layer::new(ProgramId::new([program_tag; 32]), &param).unwrap()
    }

    #[test]
    fn empty_stack_is_fatal() {
        let stack = LayerStack::new(vec![]);
        assert_matches!(stack.commit(), Err(StrataError::EmptyStack));
        assert_matches!(
            commit_layer_hashes(*META_PROGRAM_ID, &[]),
            Err(StrataError::EmptyStack)
        );
    }

    #[test]
    fn commit_is_pure() {
        let stack = LayerStack::new(vec![layer(1, 10), layer(2, 20)]);
        assert_eq!(stack.commit().unwrap(), stack.commit().unwrap());
    }

    #[test]
    fn order_changes_commitment() {
        let forward = LayerStack::new(vec![layer(1, 10), layer(2, 20)]);
        let reversed = LayerStack::new(vec![layer(2, 20), layer(1, 10)]);
        assert_ne!(forward.commit().unwrap(), reversed.commit().unwrap());
    }

    #[test]
    fn length_changes_commitment() {
        let one = LayerStack::new(vec![layer(1, 10)]);
        let two = LayerStack::new(vec![layer(1, 10), layer(1, 10)]);
        assert_ne!(one.commit().unwrap(), two.commit().unwrap());
    }

    #[test]
    fn params_change_commitment() {
        let a = LayerStack::new(vec![layer(1, 10)]);
        let b = LayerStack::new(vec![layer(1, 11)]);
        assert_ne!(a.commit().unwrap(), b.commit().unwrap());
    }

    #[test]
    fn hash_path_matches_stack_path() {
        let stack = LayerStack::new(vec![layer(1, 10), layer(2, 20)]);
        let via_hashes =
            commit_layer_hashes(*META_PROGRAM_ID, &stack.layer_hashes()).unwrap();
        assert_eq!(stack.commit().unwrap(), via_hashes);
    }

    #[test]
    fn meta_identity_binds_into_commitment() {
        let hashes = LayerStack::new(vec![layer(1, 10)]).layer_hashes();
        let system = commit_layer_hashes(*META_PROGRAM_ID, &hashes).unwrap();
        let foreign = commit_layer_hashes(ProgramId::new([9; 32]), &hashes).unwrap();
        assert_ne!(system, foreign);
    }
}
