//! # Airdrop Merkle Commitment
//!
//! Computes a binary Merkle commitment over a fixed list of (address, amount)
//! entitlements and derives, for each entitlement, an inclusion proof that
//! verifies against the resulting root. The distributor publishes the 32-byte
//! root; each recipient later redeems with their leaf data plus proof.
//!
//! ## Pipeline
//!
//! ```text
//! records ──parse──→ EntitlementRecord ──leaf_hash──→ leaves
//!                                                        │
//!                                                 [MerkleTree::build]
//!                                                        │
//!                                    root ←──────────────┴──→ proof(index)
//! ```
//!
//! ## Hashing Rules
//!
//! | Node | Digest |
//! |------|--------|
//! | Leaf | `keccak256(keccak256(address[20] ‖ amount_be[32]))` |
//! | Interior | `keccak256(min(a, b) ‖ max(a, b))` |
//! | Odd trailing node | paired with itself |
//!
//! Sorting each pair before hashing means proofs are a plain list of sibling
//! digests with no left/right flags.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): Pure tree and proof logic, no I/O
//! - **Ports Layer** (`ports/`): Inbound API trait, outbound hash/source SPIs
//! - **Adapters Layer** (`adapters/`): Keccak-256, JSON records, report rendering
//! - **Service Layer** (`service/`): `CommitmentService` with logging and policy

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export main types for convenience
pub use domain::{
    build_tree, compute_root, encode_leaf, get_proof, hash_pair, leaf_hash, parse_amount,
    verify_proof, Address, AirdropError, AirdropErrorKind, CommitmentSummary, DuplicatePolicy,
    EntitlementRecord, Hash, Leaf, MerkleConfig, MerkleProof, MerkleTree, ProofStyle, RawAmount,
    RawEntitlement, RecordField, Root, U256,
};

pub use ports::{AirdropCommitmentApi, EntitlementSource, HashProvider};

pub use adapters::{to_hex, AirdropReport, JsonEntitlementSource, Keccak256Hasher, RecipientReport};

pub use service::CommitmentService;
