//! # Inbound Ports (Driving Ports)
//!
//! Public API exposed by the commitment service.

use crate::domain::{AirdropError, CommitmentSummary, Hash, MerkleProof, RawEntitlement};

/// Primary API for committing entitlements and serving proofs.
pub trait AirdropCommitmentApi {
    /// Validate, encode and commit an ordered list of entitlements.
    ///
    /// ## Returns
    ///
    /// - `Ok(CommitmentSummary)`: root and shape of the new tree
    /// - `Err(Encoding)`: a record could not be encoded; nothing is committed
    /// - `Err(EmptyInput)`: the list was empty
    /// - `Err(DuplicateEntitlement)`: duplicate address under `Reject`
    fn commit(&mut self, records: &[RawEntitlement]) -> Result<CommitmentSummary, AirdropError>;

    /// Inclusion proof for the record at `index` of the committed list.
    ///
    /// Fails with `IndexOutOfRange` without affecting the committed tree.
    fn proof(&self, index: usize) -> Result<MerkleProof, AirdropError>;

    /// Verify a proof against the committed root.
    fn verify(&self, proof: &MerkleProof) -> bool;

    /// Committed root, if any.
    fn root(&self) -> Option<Hash>;
}
