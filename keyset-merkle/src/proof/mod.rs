//! Inclusion proof generation.
//!
//! An `InclusionProof` holds one step per level below the root. Each step
//! says how the running hash combines with the level's sibling:
//!
//! - `Right(s)`: the sibling is to the right, `parent = H(current || s)`.
//! - `Left(s)`: the sibling is to the left, `parent = H(s || current)`.
//! - `Duplicate`: the node was the unpaired last node of an odd level,
//!   `parent = H(current || current)`.

use bincode::{Decode, Encode};
use tracing::debug;

use crate::{Digest, MerkleError, MerkleHasher, MerkleTree, Sha256Hasher};

#[cfg(test)]
mod tests;

/// Upper bound on proof length accepted when decoding. A tree needs more
/// than `2^64` leaves to exceed it.
const MAX_PROOF_STEPS: usize = 64;

/// Byte limit for decoding a proof.
const MAX_ENCODED_PROOF_BYTES: usize = 16 * 1024;

/// One level of an inclusion proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ProofStep {
    /// Sibling to the left of the running hash.
    Left(Digest),
    /// Sibling to the right of the running hash.
    Right(Digest),
    /// No sibling; the running hash is paired with itself.
    Duplicate,
}

impl ProofStep {
    /// The sibling digest, or `None` for a duplicate step.
    pub fn sibling(&self) -> Option<&Digest> {
        match self {
            ProofStep::Left(sibling) | ProofStep::Right(sibling) => Some(sibling),
            ProofStep::Duplicate => None,
        }
    }

    /// Whether this level paired the node with itself.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ProofStep::Duplicate)
    }

    /// Combine the running hash with this step.
    pub fn apply<H: MerkleHasher>(&self, current: &Digest) -> Digest {
        match self {
            ProofStep::Left(sibling) => H::hash_pair(sibling, current),
            ProofStep::Right(sibling) => H::hash_pair(current, sibling),
            ProofStep::Duplicate => H::hash_pair(current, current),
        }
    }
}

/// An inclusion proof for one leaf of a [`MerkleTree`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InclusionProof {
    steps: Vec<ProofStep>,
}

/// Prove that `target` is one of `leaves`, using SHA-256.
///
/// The first leaf equal to `target` is the one proved. Fails with
/// [`MerkleError::EmptyInput`] for an empty leaf set and
/// [`MerkleError::TargetNotFound`] when `target` is absent.
pub fn prove<L: AsRef<[u8]>>(leaves: &[L], target: &[u8]) -> Result<InclusionProof, MerkleError> {
    let tree = MerkleTree::<Sha256Hasher>::build(leaves)?;
    let index = leaves
        .iter()
        .position(|leaf| leaf.as_ref() == target)
        .ok_or(MerkleError::TargetNotFound)?;
    tree.prove_index(index)
}

impl InclusionProof {
    /// Wrap precomputed steps, ordered from the leaf level upward.
    pub fn new(steps: Vec<ProofStep>) -> Self {
        InclusionProof { steps }
    }

    /// Walk from leaf `index` to the root, recording one step per level.
    pub fn generate<H: MerkleHasher>(
        tree: &MerkleTree<H>,
        index: usize,
    ) -> Result<Self, MerkleError> {
        let leaf_count = tree.leaf_count();
        if index >= leaf_count {
            return Err(MerkleError::LeafIndexOutOfRange { index, leaf_count });
        }

        let levels = tree.levels();
        let mut steps = Vec::with_capacity(tree.depth());
        let mut idx = index;
        for level in &levels[..levels.len() - 1] {
            let step = if idx % 2 == 0 {
                match level.get(idx + 1) {
                    Some(sibling) => ProofStep::Right(*sibling),
                    None => ProofStep::Duplicate,
                }
            } else {
                ProofStep::Left(level[idx - 1])
            };
            steps.push(step);
            idx /= 2;
        }

        debug!(
            index,
            steps = steps.len(),
            duplicates = steps.iter().filter(|s| s.is_duplicate()).count(),
            "generated inclusion proof"
        );
        Ok(InclusionProof { steps })
    }

    /// The steps, leaf level first.
    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// Consume the proof and return its steps.
    pub fn into_steps(self) -> Vec<ProofStep> {
        self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the proof has no steps (single-leaf tree).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The sibling digests in order, skipping duplicate steps.
    pub fn siblings(&self) -> impl Iterator<Item = &Digest> + '_ {
        self.steps.iter().filter_map(ProofStep::sibling)
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleError::InvalidProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects proofs with more steps than any tree can produce.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, MerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ MAX_ENCODED_PROOF_BYTES }>();
        let (proof, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleError::InvalidProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(MerkleError::InvalidProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        if proof.steps.len() > MAX_PROOF_STEPS {
            return Err(MerkleError::InvalidProof(format!(
                "proof has {} steps (max {})",
                proof.steps.len(),
                MAX_PROOF_STEPS
            )));
        }
        Ok(proof)
    }
}

impl From<Vec<ProofStep>> for InclusionProof {
    fn from(steps: Vec<ProofStep>) -> Self {
        InclusionProof::new(steps)
    }
}
