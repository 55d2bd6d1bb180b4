//! # Ports Layer
//!
//! Hexagonal architecture ports (interfaces) for the commitment pipeline.
//!
//! - **Driving Ports (Inbound)**: APIs consumed by adapters (CLI, test harness)
//! - **Driven Ports (Outbound)**: SPIs implemented by adapters (hash primitive, record loading)

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
