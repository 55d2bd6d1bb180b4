//! # Domain Entities
//!
//! The level-by-level Merkle tree over entitlement leaves and the inclusion
//! proofs extracted from it.
//!
//! ## Invariants
//!
//! - Level 0 is the leaf list verbatim, in input order.
//! - Level `k+1` has `ceil(len(k) / 2)` nodes; a trailing odd node is paired
//!   with itself.
//! - The final level holds exactly one digest, the root.
//! - A tree over `n` leaves has `ceil(log2(n)) + 1` levels.

use serde::{Deserialize, Serialize};

use crate::ports::HashProvider;

use super::errors::AirdropError;
use super::services::{hash_pair, verify_proof};
use super::value_objects::{Hash, Leaf, ProofStyle, Root};

/// A binary Merkle tree with every level retained.
///
/// Built once, read many times: proof extraction never mutates the tree, so a
/// shared reference can serve concurrent proof requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TreeLevels")]
pub struct MerkleTree {
    /// `levels[0]` are the leaves, `levels[last]` is `[root]`.
    levels: Vec<Vec<Hash>>,
}

/// Serialized form of [`MerkleTree`], shape-checked before use.
#[derive(Deserialize)]
struct TreeLevels {
    levels: Vec<Vec<Hash>>,
}

impl TryFrom<TreeLevels> for MerkleTree {
    type Error = AirdropError;

    fn try_from(raw: TreeLevels) -> Result<Self, Self::Error> {
        Self::from_levels(raw.levels)
    }
}

impl MerkleTree {
    /// Build a tree from leaves in their significant order.
    ///
    /// ## Algorithm
    ///
    /// 1. Level 0 = leaves
    /// 2. Scan the current level in non-overlapping pairs; a lone trailing node
    ///    is paired with itself
    /// 3. Parent = `hash_pair(left, right)`
    /// 4. Stop at a level of one node
    pub fn build<H: HashProvider + ?Sized>(
        hasher: &H,
        leaves: Vec<Leaf>,
    ) -> Result<Self, AirdropError> {
        if leaves.is_empty() {
            return Err(AirdropError::EmptyInput);
        }

        let mut levels = vec![leaves];
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next: Vec<Hash> = current
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    let right = pair.get(1).unwrap_or(left);
                    hash_pair(hasher, left, right)
                })
                .collect();

            tracing::trace!(level = levels.len(), nodes = next.len(), "tree level built");
            levels.push(next);
        }

        Ok(Self { levels })
    }

    /// Adopt precomputed levels, e.g. a tree loaded from disk.
    ///
    /// Only the shape is checked: a non-empty leaf level, each level
    /// `ceil(previous / 2)` long, a single root at the top. Digests are
    /// not recomputed.
    pub fn from_levels(levels: Vec<Vec<Hash>>) -> Result<Self, AirdropError> {
        let malformed = |reason: String| AirdropError::MalformedTree { reason };

        match levels.first() {
            None => return Err(malformed("no levels".to_string())),
            Some(leaves) if leaves.is_empty() => {
                return Err(malformed("empty leaf level".to_string()))
            }
            Some(_) => {}
        }

        for (depth, pair) in levels.windows(2).enumerate() {
            let (below, above) = (pair[0].len(), pair[1].len());
            if below == 1 {
                return Err(malformed(format!(
                    "level {depth} has a single node but is not the top"
                )));
            }
            if above != below.div_ceil(2) {
                return Err(malformed(format!(
                    "level {} has {above} nodes, expected {}",
                    depth + 1,
                    below.div_ceil(2)
                )));
            }
        }

        if levels.last().map(Vec::len) != Some(1) {
            return Err(malformed("top level is not a single root".to_string()));
        }
        Ok(Self { levels })
    }

    /// The published commitment.
    pub fn root(&self) -> Root {
        // build() guarantees a non-empty final level
        self.levels[self.levels.len() - 1][0]
    }

    /// Leaves in input order.
    pub fn leaves(&self) -> &[Leaf] {
        &self.levels[0]
    }

    /// Number of leaves (records).
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// All levels, leaves first.
    pub fn levels(&self) -> &[Vec<Hash>] {
        &self.levels
    }

    /// Number of levels, including the leaf and root levels.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// Extract the inclusion proof for the leaf at `index`.
    ///
    /// At each level below the root the sibling is at `index ^ 1`. When that
    /// position is past the end of the level the node was self-paired:
    /// `Compact` emits nothing, `Padded` emits the node itself.
    pub fn proof(&self, index: usize, style: ProofStyle) -> Result<MerkleProof, AirdropError> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(AirdropError::IndexOutOfRange { index, leaf_count });
        }

        let mut siblings = Vec::with_capacity(self.height() - 1);
        let mut position = index;

        for level in &self.levels[..self.height() - 1] {
            match level.get(position ^ 1) {
                Some(sibling) => siblings.push(*sibling),
                None if style == ProofStyle::Padded => siblings.push(level[position]),
                None => {}
            }
            position /= 2;
        }

        Ok(MerkleProof {
            leaf_index: index,
            leaf: self.levels[0][index],
            root: self.root(),
            siblings,
        })
    }
}

/// An inclusion proof for one leaf.
///
/// Siblings carry no left/right tag: parents are computed with the
/// order-independent pair hash, so identity alone is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Position of the record in the original input list.
    pub leaf_index: usize,
    /// Leaf digest being proven.
    pub leaf: Leaf,
    /// Root the proof was extracted against.
    pub root: Root,
    /// Sibling digests, leaf level first.
    pub siblings: Vec<Hash>,
}

impl MerkleProof {
    /// Number of sibling digests.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// True for the proof of a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Verify against the root carried in the proof.
    pub fn verify<H: HashProvider + ?Sized>(&self, hasher: &H) -> bool {
        verify_proof(hasher, &self.leaf, &self.siblings, &self.root)
    }

    /// Verify against an externally published root.
    pub fn verify_against<H: HashProvider + ?Sized>(&self, hasher: &H, root: &Root) -> bool {
        verify_proof(hasher, &self.leaf, &self.siblings, root)
    }
}

/// Summary of a committed entitlement set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentSummary {
    /// Root to publish on-chain.
    pub root: Root,
    /// Number of leaves (one per record).
    pub leaf_count: usize,
    /// Number of tree levels.
    pub height: usize,
    /// Records whose address already appeared earlier in the list.
    pub duplicate_count: usize,
}

/// Build the full tree from ordered leaves. Fails on an empty list.
pub fn build_tree<H: HashProvider + ?Sized>(
    hasher: &H,
    leaves: Vec<Leaf>,
) -> Result<MerkleTree, AirdropError> {
    MerkleTree::build(hasher, leaves)
}

/// Compact proof for `index`, exactly as published alongside the root.
pub fn get_proof(index: usize, tree: &MerkleTree) -> Result<Vec<Hash>, AirdropError> {
    Ok(tree.proof(index, ProofStyle::Compact)?.siblings)
}
