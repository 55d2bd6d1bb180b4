//! # Service Layer
//!
//! Wires the domain to the ports: parses records, applies the duplicate
//! policy, builds the tree and serves proofs.

pub mod commitment_service;

pub use commitment_service::CommitmentService;
