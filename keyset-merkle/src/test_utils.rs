//! Test utilities: a reference SHA-256 chain computed on hex strings,
//! independent of `MerkleHasher`.

use sha2::{Digest as _, Sha256};

/// `hex(sha256(data))`.
pub(crate) fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// `hex(sha256(left || right))` over the hex strings themselves.
pub(crate) fn pair_hex(left: &str, right: &str) -> String {
    sha256_hex(format!("{}{}", left, right).as_bytes())
}

/// `count` distinct hex identifiers shaped like encoded public keys.
pub(crate) fn sample_leaves(count: usize) -> Vec<String> {
    (0..count as u64)
        .map(|i| blake3::hash(&i.to_le_bytes()).to_hex().to_string())
        .collect()
}
