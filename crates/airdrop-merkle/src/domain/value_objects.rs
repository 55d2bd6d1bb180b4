//! # Value Objects
//!
//! Immutable value objects for entitlement commitments.
//!
//! - `Address`: 20-byte recipient, parsed case-insensitively from hex
//! - `U256`: amount, encoded as 32 big-endian bytes in the leaf preimage
//! - `EntitlementRecord`: one validated (address, amount) pair
//! - `MerkleConfig`: duplicate policy and proof style

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::AirdropError;

// Re-export U256 from primitive-types for 256-bit amounts
pub use primitive_types::U256;

/// A 32-byte digest (Keccak-256 output).
pub type Hash = [u8; 32];

/// Leaf digest of one entitlement record.
pub type Leaf = Hash;

/// Top-of-tree digest; the public commitment.
pub type Root = Hash;

/// Length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Length of an encoded amount in bytes.
pub const AMOUNT_LENGTH: usize = 32;

/// Length of the leaf preimage: address bytes followed by the amount.
pub const LEAF_PREIMAGE_LENGTH: usize = ADDRESS_LENGTH + AMOUNT_LENGTH;

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte recipient address.
///
/// Parsing normalizes case; checksummed and lowercase forms of the same
/// address produce identical bytes and therefore identical leaves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Lowercase `0x`-prefixed hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AirdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s.trim());
        if digits.len() != ADDRESS_LENGTH * 2 {
            return Err(AirdropError::address(format!(
                "expected {} hex characters, got {}",
                ADDRESS_LENGTH * 2,
                digits.len()
            )));
        }

        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| AirdropError::address(format!("invalid hex in {s:?}: {e}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// AMOUNT (U256)
// =============================================================================

/// Parse an amount from text.
///
/// Accepts a decimal integer or a `0x`-prefixed hex integer. Anything negative,
/// fractional, or at least 2^256 is rejected.
pub fn parse_amount(text: &str) -> Result<U256, AirdropError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AirdropError::amount("empty amount"));
    }
    if text.starts_with('-') {
        return Err(AirdropError::amount(format!("negative amount {text}")));
    }

    if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return parse_hex_amount(digits);
    }

    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AirdropError::amount(format!(
            "{text:?} is not a non-negative integer"
        )));
    }

    U256::from_dec_str(text)
        .map_err(|_| AirdropError::amount(format!("{text} does not fit in 256 bits")))
}

fn parse_hex_amount(digits: &str) -> Result<U256, AirdropError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AirdropError::amount(format!(
            "0x{digits} is not a hex integer"
        )));
    }

    let significant = digits.trim_start_matches('0');
    if significant.len() > AMOUNT_LENGTH * 2 {
        return Err(AirdropError::amount(format!(
            "0x{digits} does not fit in 256 bits"
        )));
    }

    // Left-pad to a full 32-byte big-endian word.
    let padded = format!("{:0>width$}", significant, width = AMOUNT_LENGTH * 2);
    let mut bytes = [0u8; AMOUNT_LENGTH];
    hex::decode_to_slice(&padded, &mut bytes)
        .map_err(|e| AirdropError::amount(e.to_string()))?;
    Ok(U256::from_big_endian(&bytes))
}

/// Encode an amount as 32 big-endian bytes.
#[must_use]
pub fn amount_to_be_bytes(amount: &U256) -> [u8; AMOUNT_LENGTH] {
    let mut bytes = [0u8; AMOUNT_LENGTH];
    amount.to_big_endian(&mut bytes);
    bytes
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

// =============================================================================
// ENTITLEMENT RECORDS
// =============================================================================

/// A validated entitlement: who receives how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitlementRecord {
    pub address: Address,
    pub amount: U256,
}

impl EntitlementRecord {
    /// Create a record from already-validated parts.
    #[must_use]
    pub const fn new(address: Address, amount: U256) -> Self {
        Self { address, amount }
    }

    /// Parse a record from its textual address and amount.
    pub fn parse(address: &str, amount: &str) -> Result<Self, AirdropError> {
        Ok(Self {
            address: address.parse()?,
            amount: parse_amount(amount)?,
        })
    }

    /// The 52-byte leaf preimage: address bytes || amount (big-endian).
    #[must_use]
    pub fn encode(&self) -> [u8; LEAF_PREIMAGE_LENGTH] {
        let mut buf = [0u8; LEAF_PREIMAGE_LENGTH];
        buf[..ADDRESS_LENGTH].copy_from_slice(self.address.as_bytes());
        buf[ADDRESS_LENGTH..].copy_from_slice(&amount_to_be_bytes(&self.amount));
        buf
    }
}

/// An entitlement as supplied by a record source, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntitlement {
    pub address: String,
    pub amount: RawAmount,
}

impl RawEntitlement {
    /// Convenience constructor for string amounts.
    pub fn new(address: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            amount: RawAmount::Text(amount.into()),
        }
    }

    /// Validate into an [`EntitlementRecord`].
    pub fn parse(&self) -> Result<EntitlementRecord, AirdropError> {
        let address = self.address.parse()?;
        let amount = match &self.amount {
            RawAmount::Unsigned(value) => U256::from(*value),
            RawAmount::Signed(value) => {
                return Err(AirdropError::amount(format!("negative amount {value}")))
            }
            RawAmount::Text(text) => parse_amount(text)?,
        };
        Ok(EntitlementRecord::new(address, amount))
    }
}

/// Amount as it appears in JSON: a plain integer or a string.
///
/// Amounts above `u64::MAX` (e.g. 25 * 10^18 base units) must be quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// What to do when the same address is listed more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep every record as its own leaf.
    Allow,
    /// Keep every record, but log each duplicate.
    #[default]
    Warn,
    /// Fail the commitment.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "warn" => Ok(Self::Warn),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown duplicate policy {other:?} (expected allow, warn or reject)"
            )),
        }
    }
}

/// How proofs treat a level where the node was paired with itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofStyle {
    /// Emit nothing for a self-paired level.
    #[default]
    Compact,
    /// Emit the node's own digest for a self-paired level, so a plain
    /// sorted-pair verifier reaches the root for every index.
    Padded,
}

impl FromStr for ProofStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "padded" => Ok(Self::Padded),
            other => Err(format!(
                "unknown proof style {other:?} (expected compact or padded)"
            )),
        }
    }
}

/// Configuration for commitment construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleConfig {
    pub duplicate_policy: DuplicatePolicy,
    pub proof_style: ProofStyle,
}
