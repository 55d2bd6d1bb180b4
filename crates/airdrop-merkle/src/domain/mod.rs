//! # Domain Layer
//!
//! Pure commitment logic: leaf encoding, tree construction, proof extraction.
//!
//! - `value_objects`: Address, U256 amounts, EntitlementRecord, MerkleConfig
//! - `services`: leaf hashing, sorted pair hashing, verification
//! - `entities`: MerkleTree, MerkleProof
//! - `errors`: AirdropError
//!
//! ## Hexagonal Architecture
//!
//! This module contains NO I/O. The hash primitive arrives through the
//! `HashProvider` port; records arrive already loaded.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use services::*;
pub use value_objects::*;
