//! # Distribution Report
//!
//! Renders the root plus every recipient's leaf and proof for publication.
//! All digests are `0x`-prefixed lowercase hex.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::domain::{AirdropError, EntitlementRecord, Hash, MerkleTree, ProofStyle};
use crate::ports::HashProvider;

/// `0x`-prefixed lowercase hex of a digest.
pub fn to_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Everything a distributor publishes and recipients need to redeem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdropReport {
    pub root: String,
    pub leaf_count: usize,
    pub height: usize,
    pub proof_style: ProofStyle,
    pub recipients: Vec<RecipientReport>,
}

/// One recipient's redemption data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientReport {
    pub index: usize,
    pub address: String,
    /// Decimal base units.
    pub amount: String,
    pub leaf: String,
    pub proof: Vec<String>,
    /// Whether `proof` folds back to `root` under the sorted-pair rule.
    pub verifies: bool,
}

impl AirdropReport {
    /// Assemble the report for `records`, which must be the list `tree` was built from.
    pub fn build<H: HashProvider + ?Sized>(
        hasher: &H,
        records: &[EntitlementRecord],
        tree: &MerkleTree,
        style: ProofStyle,
    ) -> Result<Self, AirdropError> {
        if records.len() != tree.leaf_count() {
            return Err(AirdropError::LeafCountMismatch {
                records: records.len(),
                leaf_count: tree.leaf_count(),
            });
        }

        let recipients = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let proof = tree.proof(index, style)?;
                Ok(RecipientReport {
                    index,
                    address: record.address.to_hex(),
                    amount: record.amount.to_string(),
                    leaf: to_hex(&proof.leaf),
                    proof: proof.siblings.iter().map(to_hex).collect(),
                    verifies: proof.verify(hasher),
                })
            })
            .collect::<Result<Vec<_>, AirdropError>>()?;

        Ok(Self {
            root: to_hex(&tree.root()),
            leaf_count: tree.leaf_count(),
            height: tree.height(),
            proof_style: style,
            recipients,
        })
    }

    /// Recipients whose proof does not reach the root.
    pub fn unverifiable(&self) -> impl Iterator<Item = &RecipientReport> {
        self.recipients.iter().filter(|r| !r.verifies)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, AirdropError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable listing: the root, then one block per recipient.
    ///
    /// Addresses are printed in lowercase hex; no EIP-55 checksum casing.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Merkle Root: {}", self.root);

        for recipient in &self.recipients {
            let proof = serde_json::to_string(&recipient.proof).unwrap_or_default();
            let _ = writeln!(out);
            let _ = writeln!(out, "User: {}", recipient.address);
            let _ = writeln!(out, "   Amount: {}", recipient.amount);
            let _ = writeln!(out, "   Leaf: {}", recipient.leaf);
            let _ = writeln!(out, "   Proof: {proof}");
        }
        out
    }
}
