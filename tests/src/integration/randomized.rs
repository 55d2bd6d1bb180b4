//! # Randomized Tree Checks
//!
//! Random recipient lists of every size up to a few hundred, checking tree
//! shape and proof behavior against the level sizes alone.

#[cfg(test)]
mod tests {
    use rand::seq::SliceRandom;
    use rand::Rng;

    use airdrop_merkle::{
        compute_root, leaf_hash, AirdropCommitmentApi, CommitmentService, Keccak256Hasher,
        MerkleConfig, MerkleTree, ProofStyle,
    };

    use crate::benchmarks::commitment::{random_records, to_raw};

    fn tree_of(count: usize) -> MerkleTree {
        let leaves = random_records(count)
            .iter()
            .map(|r| leaf_hash(&Keccak256Hasher, r))
            .collect();
        MerkleTree::build(&Keccak256Hasher, leaves).unwrap()
    }

    /// Levels on which `index` has no sibling.
    fn self_paired_levels(tree: &MerkleTree, index: usize) -> usize {
        let levels = tree.levels();
        levels[..levels.len() - 1]
            .iter()
            .enumerate()
            .filter(|(depth, level)| (index >> depth) ^ 1 >= level.len())
            .count()
    }

    #[test]
    fn test_level_sizes_halve_rounding_up() {
        for count in 1..=300 {
            let tree = tree_of(count);
            let sizes: Vec<usize> = tree.levels().iter().map(Vec::len).collect();

            assert_eq!(sizes[0], count);
            assert_eq!(*sizes.last().unwrap(), 1);
            for pair in sizes.windows(2) {
                assert_eq!(pair[1], pair[0].div_ceil(2), "count {count}");
            }
        }
    }

    #[test]
    fn test_padded_proofs_always_verify() {
        for count in 1..=130 {
            let tree = tree_of(count);
            for index in 0..count {
                let proof = tree.proof(index, ProofStyle::Padded).unwrap();
                assert_eq!(proof.len(), tree.height() - 1);
                assert!(proof.verify(&Keccak256Hasher), "count {count} index {index}");
            }
        }
    }

    #[test]
    fn test_compact_proofs_skip_exactly_self_paired_levels() {
        for count in 1..=130 {
            let tree = tree_of(count);
            for index in 0..count {
                let compact = tree.proof(index, ProofStyle::Compact).unwrap();
                let padded = tree.proof(index, ProofStyle::Padded).unwrap();
                let skipped = self_paired_levels(&tree, index);

                assert_eq!(compact.len() + skipped, padded.len());
                assert_eq!(
                    compact.verify(&Keccak256Hasher),
                    skipped == 0,
                    "count {count} index {index}"
                );
            }
        }
    }

    #[test]
    fn test_random_index_recomputes_root() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let count = rng.gen_range(1..=2_000);
            let tree = tree_of(count);
            let index = rng.gen_range(0..count);

            let proof = tree.proof(index, ProofStyle::Padded).unwrap();
            assert_eq!(
                compute_root(&Keccak256Hasher, &proof.leaf, &proof.siblings),
                tree.root()
            );
            assert!(tree.proof(count, ProofStyle::Padded).is_err());
        }
    }

    #[test]
    fn test_shuffled_list_changes_root() {
        let mut rng = rand::thread_rng();
        let records = random_records(64);
        let mut shuffled = records.clone();
        while shuffled == records {
            shuffled.shuffle(&mut rng);
        }

        let mut a = CommitmentService::new(MerkleConfig::default());
        let mut b = CommitmentService::new(MerkleConfig::default());
        let root_a = a.commit(&to_raw(&records)).unwrap().root;
        let root_b = b.commit(&to_raw(&shuffled)).unwrap().root;
        assert_ne!(root_a, root_b);
    }
}
