//! # Domain Errors
//!
//! Error types for the airdrop commitment pipeline.
//!
//! Nothing here is retryable: every operation is pure computation, so an error
//! either aborts the whole run (encoding, empty input, duplicates) or a single
//! proof request (index out of range).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while committing entitlements or extracting proofs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AirdropError {
    /// A record could not be encoded into a leaf (bad address or amount).
    #[error("cannot encode {field}: {reason}")]
    Encoding {
        /// Which record field was rejected.
        field: RecordField,
        /// Human-readable cause.
        reason: String,
    },

    /// Zero records were supplied; there is no tree to build.
    #[error("no entitlement records supplied")]
    EmptyInput,

    /// Proof requested for a leaf position that does not exist.
    #[error("leaf index {index} out of range (leaf count: {leaf_count})")]
    IndexOutOfRange { index: usize, leaf_count: usize },

    /// The same address appears twice and the policy forbids it.
    #[error("duplicate entitlement for {address} at indices {first_index} and {duplicate_index}")]
    DuplicateEntitlement {
        address: String,
        first_index: usize,
        duplicate_index: usize,
    },

    /// The record source could not be read or parsed.
    #[error("record source error: {message}")]
    Source { message: String },

    /// A record list was paired with a tree built over a different list.
    #[error("{records} records do not match a tree of {leaf_count} leaves")]
    LeafCountMismatch { records: usize, leaf_count: usize },

    /// Tree levels that `MerkleTree::build` could not have produced.
    #[error("malformed tree: {reason}")]
    MalformedTree { reason: String },
}

impl AirdropError {
    /// Shorthand for an address encoding failure.
    pub fn address(reason: impl Into<String>) -> Self {
        Self::Encoding {
            field: RecordField::Address,
            reason: reason.into(),
        }
    }

    /// Shorthand for an amount encoding failure.
    pub fn amount(reason: impl Into<String>) -> Self {
        Self::Encoding {
            field: RecordField::Amount,
            reason: reason.into(),
        }
    }

    /// Coarse classification, handy for matching without caring about payloads.
    pub fn kind(&self) -> AirdropErrorKind {
        match self {
            Self::Encoding { .. } => AirdropErrorKind::Encoding,
            Self::EmptyInput => AirdropErrorKind::EmptyInput,
            Self::IndexOutOfRange { .. } => AirdropErrorKind::IndexOutOfRange,
            Self::DuplicateEntitlement { .. } => AirdropErrorKind::DuplicateEntitlement,
            Self::Source { .. } => AirdropErrorKind::Source,
            Self::LeafCountMismatch { .. } => AirdropErrorKind::LeafCountMismatch,
            Self::MalformedTree { .. } => AirdropErrorKind::MalformedTree,
        }
    }
}

/// Record field named in an [`AirdropError::Encoding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Address,
    Amount,
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Amount => write!(f, "amount"),
        }
    }
}

/// Error kind enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirdropErrorKind {
    Encoding,
    EmptyInput,
    IndexOutOfRange,
    DuplicateEntitlement,
    Source,
    LeafCountMismatch,
    MalformedTree,
}

impl From<serde_json::Error> for AirdropError {
    fn from(err: serde_json::Error) -> Self {
        Self::Source {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AirdropError {
    fn from(err: std::io::Error) -> Self {
        Self::Source {
            message: err.to_string(),
        }
    }
}
