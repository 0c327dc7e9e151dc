//! Proof verification.
//!
//! Pure function, no tree required: the root is re-derived from the leaf
//! value and the proof steps and compared to the claimed root.

use tracing::trace;

use crate::{Digest, InclusionProof, MerkleError, MerkleHasher, Sha256Hasher};

/// Verify a SHA-256 proof for `leaf` against `claimed_root`.
///
/// See [`InclusionProof::verify`].
pub fn verify(
    leaf: &[u8],
    proof: &InclusionProof,
    claimed_root: &Digest,
) -> Result<bool, MerkleError> {
    proof.verify::<Sha256Hasher>(leaf, claimed_root)
}

/// Like [`verify`], folding every failure into `false`.
pub fn is_member(leaf: &[u8], proof: &InclusionProof, claimed_root: &Digest) -> bool {
    matches!(verify(leaf, proof, claimed_root), Ok(true))
}

impl InclusionProof {
    /// Re-derive the root implied by `leaf` and this proof.
    pub fn compute_root<H: MerkleHasher>(&self, leaf: &[u8]) -> Digest {
        self.walk::<H>(leaf).0
    }

    /// Re-derive the root, also returning the number of hash invocations.
    pub(crate) fn walk<H: MerkleHasher>(&self, leaf: &[u8]) -> (Digest, u64) {
        let leaf_hash = H::hash(leaf);
        self.steps().iter().enumerate().fold(
            (leaf_hash, 1),
            |(current, hash_calls), (level, step)| {
                let parent = step.apply::<H>(&current);
                trace!(level, ?step, %parent, "applied proof step");
                (parent, hash_calls + 1)
            },
        )
    }

    /// Check that `leaf` and this proof produce `claimed_root`.
    ///
    /// Returns `Ok(false)` on a root mismatch. The only error is
    /// [`MerkleError::MalformedProof`], for an empty proof whose claimed root
    /// is not the leaf hash: an empty proof describes a single-leaf tree, so
    /// it cannot commit to any other root.
    pub fn verify<H: MerkleHasher>(
        &self,
        leaf: &[u8],
        claimed_root: &Digest,
    ) -> Result<bool, MerkleError> {
        if self.is_empty() {
            let leaf_hash = H::hash(leaf);
            if &leaf_hash != claimed_root {
                return Err(MerkleError::MalformedProof(format!(
                    "empty proof for leaf hash {} cannot produce root {}",
                    leaf_hash, claimed_root
                )));
            }
            return Ok(true);
        }

        let computed = self.compute_root::<H>(leaf);
        let matches = &computed == claimed_root;
        trace!(%computed, %claimed_root, matches, "verified inclusion proof");
        Ok(matches)
    }
}
