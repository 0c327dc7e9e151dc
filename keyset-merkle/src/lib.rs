//! Binary Merkle tree over a static set of identifiers.
//!
//! The tree is built once, bottom-up, from an ordered list of leaf values
//! (typically hex-encoded public keys) and kept as a flat sequence of level
//! arrays: level 0 holds the leaf digests, the last level holds the root.
//!
//! Hash scheme, for a pluggable [`MerkleHasher`] `H`:
//!
//! - leaf:     `H(value)`
//! - internal: `H(hex(left) || hex(right))`, concatenating the lowercase hex
//!   forms of the children, not their raw bytes.
//!
//! When a level has an odd number of nodes, the last node is paired with
//! itself. Inclusion proofs record that case as an explicit
//! [`ProofStep::Duplicate`] step, so a verifier never has to guess whether a
//! sibling was dropped.
//!
//! # Core types
//!
//! - [`MerkleTree`]: the level arrays (build, root, prove).
//! - [`InclusionProof`] / [`ProofStep`]: the proof path (verify, encode).
//! - [`MembershipStatement`] / [`ProofSystemAdapter`]: the hand-off to an
//!   external proving system.

#![warn(missing_docs)]

mod config;
mod digest;
mod error;
pub(crate) mod hash;
pub(crate) mod proof;
mod statement;
pub(crate) mod tree;
mod verify;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{DEFAULT_PARALLEL_THRESHOLD, TreeConfig};
pub use digest::{DIGEST_LEN, Digest, HEX_LEN};
pub use error::MerkleError;
pub use hash::{Blake3Hasher, MerkleHasher, Sha256Hasher};
pub use proof::{InclusionProof, ProofStep, prove};
pub use statement::{MembershipStatement, NativeAdapter, NativeAttestation, ProofSystemAdapter};
pub use tree::{MerkleTree, build};
pub use verify::{is_member, verify};
