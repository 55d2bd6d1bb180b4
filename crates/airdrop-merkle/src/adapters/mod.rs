//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports plus the report renderer
//! consumed by the CLI.

pub mod json_source;
pub mod keccak;
pub mod report;

pub use json_source::JsonEntitlementSource;
pub use keccak::Keccak256Hasher;
pub use report::{to_hex, AirdropReport, RecipientReport};
