use std::{fmt, str::FromStr};

use bincode::{Decode, Encode};

use crate::MerkleError;

/// Length of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Length of the canonical hex form of a digest.
pub const HEX_LEN: usize = 2 * DIGEST_LEN;

/// A 32-byte hash output.
///
/// The canonical form is lowercase hex; it is what `Display` prints and what
/// internal nodes concatenate before hashing. Byte equality and equality of
/// the canonical strings coincide.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wrap raw digest bytes.
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Canonical lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a digest from 64 hex characters. Either case is accepted.
    pub fn from_hex(s: &str) -> Result<Self, MerkleError> {
        if s.len() != HEX_LEN {
            return Err(MerkleError::InvalidDigest(format!(
                "expected {} hex characters, got {}",
                HEX_LEN,
                s.len()
            )));
        }
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| MerkleError::InvalidDigest(format!("{}: {}", s, e)))?;
        Ok(Digest(bytes))
    }

    /// Write the canonical hex form into `out`.
    pub(crate) fn write_hex(&self, out: &mut [u8; HEX_LEN]) {
        let encoded = hex::encode_to_slice(self.0, out);
        debug_assert!(encoded.is_ok(), "HEX_LEN is twice DIGEST_LEN");
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.to_hex()
    }
}

impl TryFrom<String> for Digest {
    type Error = MerkleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Digest::from_hex(&s)
    }
}

impl FromStr for Digest {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Digest::from_hex(s)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; HEX_LEN];
        self.write_hex(&mut buf);
        // hex output is always ASCII
        f.write_str(std::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_is_lowercase() {
        let digest = Digest::new([0xAB; DIGEST_LEN]);
        assert_eq!(digest.to_hex(), "ab".repeat(DIGEST_LEN));
        assert_eq!(digest.to_string(), digest.to_hex());
        assert_eq!(Digest::from_hex(&digest.to_hex()), Ok(digest));
    }

    #[test]
    fn test_from_hex_accepts_uppercase() {
        let upper = "AB".repeat(DIGEST_LEN);
        let digest: Digest = upper.parse().expect("uppercase hex should parse");
        assert_eq!(digest, Digest::new([0xab; DIGEST_LEN]));
        assert_eq!(digest.to_hex(), upper.to_lowercase());
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(matches!(
            Digest::from_hex("abcd"),
            Err(MerkleError::InvalidDigest(_))
        ));
        assert!(matches!(
            Digest::from_hex(&"zz".repeat(DIGEST_LEN)),
            Err(MerkleError::InvalidDigest(_))
        ));
    }

    #[test]
    fn test_write_hex_matches_to_hex() {
        let digest = Digest::new(core::array::from_fn(|i| i as u8));
        let mut buf = [0u8; HEX_LEN];
        digest.write_hex(&mut buf);
        assert_eq!(std::str::from_utf8(&buf), Ok(digest.to_hex().as_str()));
    }

    #[test]
    fn test_debug_shows_hex() {
        let digest = Digest::new([0; DIGEST_LEN]);
        assert_eq!(format!("{:?}", digest), format!("Digest({})", "0".repeat(HEX_LEN)));
    }
}
