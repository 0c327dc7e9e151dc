use std::marker::PhantomData;

use tracing::debug;

use crate::{
    Digest, InclusionProof, MembershipStatement, MerkleError, MerkleHasher, Sha256Hasher,
    TreeConfig,
};

/// A binary Merkle tree stored as level arrays.
///
/// `levels[0]` holds the leaf digests in input order and the last level holds
/// the single root digest. Every level satisfies
/// `levels[i + 1].len() == levels[i].len().div_ceil(2)`.
///
/// The tree is immutable once built; a different leaf set needs a new tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree<H = Sha256Hasher> {
    levels: Vec<Vec<Digest>>,
    hash_calls: u64,
    _hasher: PhantomData<H>,
}

/// Build a SHA-256 tree from `leaves`.
///
/// Shorthand for [`MerkleTree::build`] with the default hasher.
pub fn build<L: AsRef<[u8]>>(leaves: &[L]) -> Result<MerkleTree, MerkleError> {
    MerkleTree::<Sha256Hasher>::build(leaves)
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Build the tree from an ordered, non-empty list of leaf values.
    pub fn build<L: AsRef<[u8]>>(leaves: &[L]) -> Result<Self, MerkleError> {
        Self::build_with_config(leaves, &TreeConfig::default())
    }

    /// Build the tree with explicit scheduling options.
    ///
    /// The resulting levels are identical for every configuration.
    pub fn build_with_config<L: AsRef<[u8]>>(
        leaves: &[L],
        config: &TreeConfig,
    ) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let leaf_level: Vec<Digest> = leaves.iter().map(|leaf| H::hash(leaf.as_ref())).collect();
        let mut hash_calls = leaf_level.len() as u64;
        let mut levels = vec![leaf_level];

        loop {
            let current = &levels[levels.len() - 1];
            if current.len() == 1 {
                break;
            }
            let parents = parent_level::<H>(current, config);
            hash_calls += parents.len() as u64;
            levels.push(parents);
        }

        let tree = MerkleTree {
            levels,
            hash_calls,
            _hasher: PhantomData,
        };
        debug!(
            hasher = H::NAME,
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            root = %tree.root(),
            "built merkle tree"
        );
        Ok(tree)
    }

    /// The root digest.
    pub fn root(&self) -> Digest {
        self.levels[self.levels.len() - 1][0]
    }

    /// All levels, leaves first.
    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// One level by index (0 = leaves).
    pub fn level(&self, index: usize) -> Option<&[Digest]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    /// The leaf digests, in input order.
    pub fn leaves(&self) -> &[Digest] {
        &self.levels[0]
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels above the leaves; also the length of every proof.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Number of hash invocations spent building the tree.
    pub fn hash_calls(&self) -> u64 {
        self.hash_calls
    }

    /// Index of the first leaf whose value is `leaf`.
    pub fn position_of(&self, leaf: &[u8]) -> Option<usize> {
        let target = H::hash(leaf);
        self.leaves().iter().position(|digest| *digest == target)
    }

    /// Inclusion proof for the first leaf whose value is `leaf`.
    pub fn prove(&self, leaf: &[u8]) -> Result<InclusionProof, MerkleError> {
        let index = self.position_of(leaf).ok_or(MerkleError::TargetNotFound)?;
        self.prove_index(index)
    }

    /// Inclusion proof for the leaf at `index`.
    pub fn prove_index(&self, index: usize) -> Result<InclusionProof, MerkleError> {
        InclusionProof::generate(self, index)
    }

    /// Bundle `leaf`, its proof and the root for a proving system.
    pub fn statement_for(&self, leaf: &[u8]) -> Result<MembershipStatement, MerkleError> {
        let proof = self.prove(leaf)?;
        Ok(MembershipStatement::new(leaf.to_vec(), self.root(), proof))
    }
}

/// Hash one level into the next. A trailing unpaired node is paired with
/// itself.
#[cfg(feature = "parallel")]
fn parent_level<H: MerkleHasher>(level: &[Digest], config: &TreeConfig) -> Vec<Digest> {
    use rayon::prelude::*;

    if config.hashes_in_parallel(level.len()) {
        level.par_chunks(2).map(hash_chunk::<H>).collect()
    } else {
        level.chunks(2).map(hash_chunk::<H>).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn parent_level<H: MerkleHasher>(level: &[Digest], _config: &TreeConfig) -> Vec<Digest> {
    level.chunks(2).map(hash_chunk::<H>).collect()
}

fn hash_chunk<H: MerkleHasher>(pair: &[Digest]) -> Digest {
    let left = &pair[0];
    let right = pair.get(1).unwrap_or(left);
    H::hash_pair(left, right)
}
