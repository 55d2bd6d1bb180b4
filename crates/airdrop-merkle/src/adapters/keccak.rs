//! Keccak-256 hash provider (the EVM's `keccak256`, not NIST SHA3-256).

use sha3::{Digest, Keccak256};

use crate::domain::Hash;
use crate::ports::HashProvider;

/// Stateless Keccak-256 hasher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keccak256Hasher;

impl HashProvider for Keccak256Hasher {
    fn hash(&self, data: &[u8]) -> Hash {
        Keccak256::digest(data).into()
    }
}
