//! # Outbound Ports (Driven Ports)
//!
//! SPIs required by the commitment pipeline.

use crate::domain::{AirdropError, Hash, RawEntitlement};

/// Abstract interface for the 32-byte cryptographic hash.
///
/// Leaves and interior nodes are both derived through this single primitive.
pub trait HashProvider: Send + Sync {
    /// Hash arbitrary bytes.
    fn hash(&self, data: &[u8]) -> Hash;
}

/// Abstract interface for loading the entitlement list.
///
/// Order is significant: it fixes every record's leaf index.
pub trait EntitlementSource {
    /// Load every record, in distribution order.
    fn load(&self) -> Result<Vec<RawEntitlement>, AirdropError>;
}
