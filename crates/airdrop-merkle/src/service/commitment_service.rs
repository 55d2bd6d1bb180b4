//! Commitment service implementing [`AirdropCommitmentApi`].

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::adapters::{to_hex, AirdropReport, Keccak256Hasher};
use crate::domain::{
    leaf_hash, Address, AirdropError, CommitmentSummary, DuplicatePolicy, EntitlementRecord, Hash,
    MerkleConfig, MerkleProof, MerkleTree, RawEntitlement,
};
use crate::ports::{AirdropCommitmentApi, EntitlementSource, HashProvider};

/// A committed entitlement list and the tree built over it.
#[derive(Debug, Clone)]
struct Committed {
    records: Vec<EntitlementRecord>,
    tree: MerkleTree,
}

/// Commitment service.
///
/// Holds at most one committed tree. A failed `commit` discards any previous
/// commitment, so a tree is never served for a list that did not fully encode.
#[derive(Debug, Clone)]
pub struct CommitmentService<H = Keccak256Hasher> {
    hasher: H,
    config: MerkleConfig,
    committed: Option<Committed>,
}

impl Default for CommitmentService<Keccak256Hasher> {
    fn default() -> Self {
        Self::new(MerkleConfig::default())
    }
}

impl CommitmentService<Keccak256Hasher> {
    /// Service backed by Keccak-256.
    pub fn new(config: MerkleConfig) -> Self {
        Self::with_hasher(Keccak256Hasher, config)
    }
}

impl<H: HashProvider> CommitmentService<H> {
    /// Service backed by a custom hash primitive.
    pub fn with_hasher(hasher: H, config: MerkleConfig) -> Self {
        Self {
            hasher,
            config,
            committed: None,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &MerkleConfig {
        &self.config
    }

    /// Hash primitive in use.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Load from `source` and commit.
    pub fn commit_from<S: EntitlementSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<CommitmentSummary, AirdropError> {
        self.committed = None;
        let records = source.load()?;
        self.commit(&records)
    }

    /// Committed tree, if any.
    pub fn tree(&self) -> Option<&MerkleTree> {
        self.committed.as_ref().map(|c| &c.tree)
    }

    /// Committed records in leaf order.
    pub fn records(&self) -> &[EntitlementRecord] {
        self.committed
            .as_ref()
            .map(|c| c.records.as_slice())
            .unwrap_or_default()
    }

    /// Report of root, leaves and proofs in the configured proof style.
    pub fn report(&self) -> Result<AirdropReport, AirdropError> {
        let committed = self.committed.as_ref().ok_or(AirdropError::EmptyInput)?;
        AirdropReport::build(
            &self.hasher,
            &committed.records,
            &committed.tree,
            self.config.proof_style,
        )
    }

    /// Parse every record; the first failure aborts the run.
    fn parse_records(raw: &[RawEntitlement]) -> Result<Vec<EntitlementRecord>, AirdropError> {
        raw.iter()
            .enumerate()
            .map(|(index, entry)| {
                entry.parse().map_err(|err| {
                    warn!(index, address = %entry.address, error = %err, "record rejected");
                    match err {
                        AirdropError::Encoding { field, reason } => AirdropError::Encoding {
                            field,
                            reason: format!("record {index}: {reason}"),
                        },
                        other => other,
                    }
                })
            })
            .collect()
    }

    /// Apply the duplicate policy. Returns how many repeats were kept.
    fn check_duplicates(&self, records: &[EntitlementRecord]) -> Result<usize, AirdropError> {
        let mut first_seen: HashMap<Address, usize> = HashMap::with_capacity(records.len());
        let mut duplicates = 0;

        for (index, record) in records.iter().enumerate() {
            let Some(&first_index) = first_seen.get(&record.address) else {
                first_seen.insert(record.address, index);
                continue;
            };

            duplicates += 1;
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(AirdropError::DuplicateEntitlement {
                        address: record.address.to_hex(),
                        first_index,
                        duplicate_index: index,
                    });
                }
                DuplicatePolicy::Warn => warn!(
                    address = %record.address,
                    first_index,
                    duplicate_index = index,
                    "duplicate entitlement kept as separate leaf"
                ),
                DuplicatePolicy::Allow => debug!(
                    address = %record.address,
                    first_index,
                    duplicate_index = index,
                    "duplicate entitlement allowed"
                ),
            }
        }

        Ok(duplicates)
    }
}

impl<H: HashProvider> AirdropCommitmentApi for CommitmentService<H> {
    fn commit(&mut self, raw: &[RawEntitlement]) -> Result<CommitmentSummary, AirdropError> {
        self.committed = None;

        if raw.is_empty() {
            return Err(AirdropError::EmptyInput);
        }

        let records = Self::parse_records(raw)?;
        let duplicate_count = self.check_duplicates(&records)?;

        let leaves: Vec<Hash> = records
            .iter()
            .map(|record| leaf_hash(&self.hasher, record))
            .collect();
        let tree = MerkleTree::build(&self.hasher, leaves)?;

        for (level, nodes) in tree.levels().iter().enumerate() {
            debug!(level, nodes = nodes.len(), "tree level");
        }

        let summary = CommitmentSummary {
            root: tree.root(),
            leaf_count: tree.leaf_count(),
            height: tree.height(),
            duplicate_count,
        };

        info!(
            root = %to_hex(&summary.root),
            leaves = summary.leaf_count,
            height = summary.height,
            duplicates = summary.duplicate_count,
            "entitlements committed"
        );

        self.committed = Some(Committed { records, tree });
        Ok(summary)
    }

    fn proof(&self, index: usize) -> Result<MerkleProof, AirdropError> {
        let Some(committed) = self.committed.as_ref() else {
            return Err(AirdropError::IndexOutOfRange {
                index,
                leaf_count: 0,
            });
        };

        let proof = committed.tree.proof(index, self.config.proof_style)?;
        debug!(index, siblings = proof.len(), "proof extracted");
        Ok(proof)
    }

    fn verify(&self, proof: &MerkleProof) -> bool {
        match self.root() {
            Some(root) => proof.verify_against(&self.hasher, &root),
            None => false,
        }
    }

    fn root(&self) -> Option<Hash> {
        self.tree().map(MerkleTree::root)
    }
}
