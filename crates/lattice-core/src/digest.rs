//! # Keccak-256 Digests
//!
//! Defines `Hash32` and `keccak256()`, the single wrap point for the
//! 256-bit hash primitive used by the typed-data signing path.
//!
//! Every digest in the workspace is a `Hash32` produced here. Keeping one
//! wrap point means the hashing backend can never diverge between the
//! domain separator, struct hashes, and the final signing digest.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// A 256-bit digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash32(pub [u8; 32]);

impl Hash32 {
    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as lowercase hex without a prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for Hash32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Hash32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Compute the keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> Hash32 {
    let hash = Keccak256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    Hash32(bytes)
}
