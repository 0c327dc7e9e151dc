use sha2::{Digest as _, Sha256};

use crate::{Digest, HEX_LEN};

/// A hash primitive for leaves and internal nodes.
///
/// Implementors only supply [`hash`](MerkleHasher::hash). Pair hashing is
/// fixed for every primitive: `hash(hex(left) || hex(right))` over the
/// lowercase hex forms, so a verifier reproduces exactly the bytes hashed
/// during construction.
pub trait MerkleHasher {
    /// Short name used in logs.
    const NAME: &'static str;

    /// Hash arbitrary bytes.
    fn hash(data: &[u8]) -> Digest;

    /// Hash two child digests into their parent.
    fn hash_pair(left: &Digest, right: &Digest) -> Digest {
        let mut buf = [[0u8; HEX_LEN]; 2];
        left.write_hex(&mut buf[0]);
        right.write_hex(&mut buf[1]);
        Self::hash(buf.as_flattened())
    }
}

/// SHA-256. The default primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl MerkleHasher for Sha256Hasher {
    const NAME: &'static str = "sha256";

    fn hash(data: &[u8]) -> Digest {
        Digest::new(Sha256::digest(data).into())
    }
}

/// BLAKE3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Hasher;

impl MerkleHasher for Blake3Hasher {
    const NAME: &'static str = "blake3";

    fn hash(data: &[u8]) -> Digest {
        Digest::new(*blake3::hash(data).as_bytes())
    }
}
