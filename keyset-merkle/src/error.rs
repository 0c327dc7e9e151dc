use thiserror::Error;

/// Errors from Merkle tree construction, proving and verification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// No leaves were supplied, so there is nothing to build a tree from.
    #[error("cannot build a merkle tree from an empty leaf set")]
    EmptyInput,
    /// The requested leaf is not part of the tree.
    #[error("target leaf is not part of the tree")]
    TargetNotFound,
    /// A leaf index past the end of the leaf level.
    #[error("leaf index {index} out of range (leaf count {leaf_count})")]
    LeafIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of leaves in the tree.
        leaf_count: usize,
    },
    /// An empty proof whose claimed root is not the leaf hash.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// A digest that is not 64 hex characters.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),
    /// A proof that cannot be decoded or fails an adapter check.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}
