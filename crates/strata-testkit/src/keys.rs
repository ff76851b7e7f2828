//! Deterministic ed25519 key fixtures
//!
//! Tests need stable signer identities; deriving them from seeds keeps
//! every run, and every commitment built from them, reproducible.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};

use strata_core::{Condition, SignerKey};
use strata_policies::AuthorizationPolicy;

/// A deterministic keypair for one test identity.
#[derive(Debug, Clone)]
pub struct KeyFixture {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl KeyFixture {
    /// Derive a keypair from a fixed 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Derive a keypair from a seed string such as `"alice"`.
    pub fn from_seed_string(seed: &str) -> Self {
        let digest: [u8; 32] = Sha256::digest(seed.as_bytes()).into();
        Self::from_seed(&digest)
    }

    /// The signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// The verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// The signer identity as it appears in conditions and layer params.
    pub fn signer(&self) -> SignerKey {
        SignerKey::new(self.verifying_key.to_bytes())
    }

    /// Sign the spend message for a condition proposal, the way a wallet
    /// would satisfy the `RequireSignature` this identity's authorization
    /// layer appends.
    pub fn sign_proposal(&self, conditions: &[Condition]) -> Signature {
        let message = AuthorizationPolicy::spend_message(conditions)
            .expect("condition proposals used in tests must encode");
        self.signing_key.sign(message.as_bytes())
    }
}
