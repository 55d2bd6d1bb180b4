//! # Domain Services
//!
//! Pure hashing rules shared by tree construction and proof verification.
//!
//! - Leaf: `H(H(address || amount_be32))`
//! - Interior node: `H(min(a, b) || max(a, b))`
//!
//! The hash primitive is injected through [`HashProvider`].

use crate::ports::HashProvider;

use super::errors::AirdropError;
use super::value_objects::{EntitlementRecord, Hash, Leaf};

/// Encode one entitlement into its leaf digest.
///
/// Fails with `Encoding` when the address is not 20 hex bytes or the amount is
/// not an integer in `0..2^256`.
pub fn encode_leaf<H: HashProvider + ?Sized>(
    hasher: &H,
    address: &str,
    amount: &str,
) -> Result<Leaf, AirdropError> {
    let record = EntitlementRecord::parse(address, amount)?;
    Ok(leaf_hash(hasher, &record))
}

/// Leaf digest of a validated record.
///
/// The preimage is hashed twice; leaves are never single-hashed.
pub fn leaf_hash<H: HashProvider + ?Sized>(hasher: &H, record: &EntitlementRecord) -> Leaf {
    let inner = hasher.hash(&record.encode());
    hasher.hash(&inner)
}

/// Hash two sibling digests into their parent.
///
/// Operands are ordered by byte value first, so `hash_pair(a, b) == hash_pair(b, a)`.
pub fn hash_pair<H: HashProvider + ?Sized>(hasher: &H, a: &Hash, b: &Hash) -> Hash {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(low);
    buf[32..].copy_from_slice(high);
    hasher.hash(&buf)
}

/// Fold a leaf through its proof siblings, bottom-up.
pub fn compute_root<H: HashProvider + ?Sized>(hasher: &H, leaf: &Leaf, siblings: &[Hash]) -> Hash {
    siblings
        .iter()
        .fold(*leaf, |current, sibling| hash_pair(hasher, &current, sibling))
}

/// Check that `leaf` plus `siblings` reconstructs `root`.
pub fn verify_proof<H: HashProvider + ?Sized>(
    hasher: &H,
    leaf: &Leaf,
    siblings: &[Hash],
    root: &Hash,
) -> bool {
    compute_root(hasher, leaf, siblings) == *root
}
