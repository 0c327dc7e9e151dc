//! Hand-off to an external proving system.
//!
//! A proving system treats the root as a public input and the leaf plus its
//! proof path as witness data, and re-derives the root inside its circuit.
//! [`NativeAdapter`] performs the same constraint natively.

use std::marker::PhantomData;

use tracing::debug;

use crate::{Digest, InclusionProof, MerkleError, MerkleHasher, Sha256Hasher};

/// Everything a proving system needs to attest membership of one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MembershipStatement {
    leaf: Vec<u8>,
    root: Digest,
    proof: InclusionProof,
}

impl MembershipStatement {
    /// Assemble a statement from its parts.
    pub fn new(leaf: Vec<u8>, root: Digest, proof: InclusionProof) -> Self {
        MembershipStatement { leaf, root, proof }
    }

    /// The root digest, the statement's public input.
    pub fn public_root(&self) -> &Digest {
        &self.root
    }

    /// The leaf value.
    pub fn leaf(&self) -> &[u8] {
        &self.leaf
    }

    /// The inclusion proof.
    pub fn proof(&self) -> &InclusionProof {
        &self.proof
    }

    /// The private part of the statement: leaf value and proof path.
    pub fn witness(&self) -> (&[u8], &InclusionProof) {
        (&self.leaf, &self.proof)
    }
}

/// A proving system that attests [`MembershipStatement`]s.
pub trait ProofSystemAdapter {
    /// The attestation produced by [`prove`](ProofSystemAdapter::prove).
    type Output;
    /// Adapter-specific failure.
    type Error: From<MerkleError>;

    /// Produce an attestation, failing if the witness does not satisfy the
    /// statement.
    fn prove(&self, statement: &MembershipStatement) -> Result<Self::Output, Self::Error>;

    /// Check an attestation against the statement's public input.
    fn verify(
        &self,
        statement: &MembershipStatement,
        output: &Self::Output,
    ) -> Result<bool, Self::Error>;
}

/// Result of [`NativeAdapter::prove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeAttestation {
    /// The root re-derived from the witness.
    pub root: Digest,
    /// Hash invocations counted while re-deriving it.
    pub hash_calls: u64,
}

/// Checks the membership constraint directly, without a circuit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeAdapter<H = Sha256Hasher> {
    _hasher: PhantomData<H>,
}

impl<H: MerkleHasher> NativeAdapter<H> {
    /// Create an adapter for hasher `H`.
    pub fn new() -> Self {
        NativeAdapter {
            _hasher: PhantomData,
        }
    }
}

impl<H: MerkleHasher> ProofSystemAdapter for NativeAdapter<H> {
    type Output = NativeAttestation;
    type Error = MerkleError;

    fn prove(&self, statement: &MembershipStatement) -> Result<NativeAttestation, MerkleError> {
        let (leaf, proof) = statement.witness();
        let public_root = statement.public_root();
        if !proof.verify::<H>(leaf, public_root)? {
            return Err(MerkleError::InvalidProof(format!(
                "witness re-derives {} instead of public root {}",
                proof.compute_root::<H>(leaf),
                public_root
            )));
        }
        let (root, hash_calls) = proof.walk::<H>(leaf);
        let attestation = NativeAttestation { root, hash_calls };
        debug!(hasher = H::NAME, root = %attestation.root, hash_calls, "attested membership natively");
        Ok(attestation)
    }

    /// Re-checks the witness against the public root, then binds the
    /// attestation to that root.
    fn verify(
        &self,
        statement: &MembershipStatement,
        output: &NativeAttestation,
    ) -> Result<bool, MerkleError> {
        let (leaf, proof) = statement.witness();
        let public_root = statement.public_root();
        Ok(proof.verify::<H>(leaf, public_root)? && &output.root == public_root)
    }
}
