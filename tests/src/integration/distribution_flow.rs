//! # Distribution Flow
//!
//! A recipient list goes through the CLI pipeline; the published report is
//! then consumed by a redemption ledger that only knows the root.
//!
//! ## Flow Tested:
//!
//! 1. **List → Root**: JSON file on disk produces the reference root
//! 2. **Report → Redemption**: every published proof redeems exactly once
//! 3. **Forgery**: altered amounts, foreign addresses and replays are refused

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Write;
    use std::path::PathBuf;

    use sha3::{Digest, Keccak256};
    use tempfile::NamedTempFile;

    use airdrop_cli::{render, run, CliConfig, OutputFormat};
    use airdrop_merkle::{
        encode_leaf, verify_proof, Address, AirdropReport, Hash, Keccak256Hasher, MerkleConfig,
        ProofStyle, U256,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const ROOT_FOUR: &str = "0xbbaee090ecea8ec3e5b792ddf25166d86a42439b02f01c462e4eb5b78df3357c";

    fn bundled_list() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../crates/airdrop-cli/data/recipients.json")
    }

    fn decode(hex_str: &str) -> Hash {
        let mut out = [0u8; 32];
        hex::decode_to_slice(hex_str.trim_start_matches("0x"), &mut out).unwrap();
        out
    }

    fn write_list(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn commit_file(path: PathBuf, style: ProofStyle) -> AirdropReport {
        run(&CliConfig {
            input: path,
            merkle: MerkleConfig {
                proof_style: style,
                ..MerkleConfig::default()
            },
            ..CliConfig::default()
        })
        .unwrap()
    }

    /// Leaf computed straight from sha3, bypassing the crate's encoder.
    fn reference_leaf(address: &str, amount: u128) -> Hash {
        let mut preimage = hex::decode(address.trim_start_matches("0x")).unwrap();
        preimage.extend_from_slice(&[0u8; 16]);
        preimage.extend_from_slice(&amount.to_be_bytes());
        assert_eq!(preimage.len(), 52);

        let inner = Keccak256::digest(&preimage);
        Keccak256::digest(inner).into()
    }

    /// Redemption side: holds only the published root.
    struct ClaimLedger {
        root: Hash,
        claimed: HashSet<Address>,
    }

    impl ClaimLedger {
        fn new(root: Hash) -> Self {
            Self {
                root,
                claimed: HashSet::new(),
            }
        }

        fn claim(&mut self, address: &str, amount: &str, proof: &[String]) -> Result<(), String> {
            let parsed: Address = address.parse().map_err(|e| format!("{e}"))?;
            if self.claimed.contains(&parsed) {
                return Err("already claimed".to_string());
            }

            let leaf = encode_leaf(&Keccak256Hasher, address, amount).map_err(|e| format!("{e}"))?;
            let siblings: Vec<Hash> = proof.iter().map(|p| decode(p)).collect();
            if !verify_proof(&Keccak256Hasher, &leaf, &siblings, &self.root) {
                return Err("invalid proof".to_string());
            }

            self.claimed.insert(parsed);
            Ok(())
        }
    }

    // =============================================================================
    // LIST → ROOT
    // =============================================================================

    #[test]
    fn test_bundled_list_produces_reference_root() {
        let report = commit_file(bundled_list(), ProofStyle::Compact);
        assert_eq!(report.root, ROOT_FOUR);
        assert_eq!(report.height, 3);
        assert!(report.recipients.iter().all(|r| r.proof.len() == 2));
    }

    #[test]
    fn test_leaves_match_independent_encoding() {
        let report = commit_file(bundled_list(), ProofStyle::Compact);

        for recipient in &report.recipients {
            let amount: u128 = recipient.amount.parse().unwrap();
            assert_eq!(
                decode(&recipient.leaf),
                reference_leaf(&recipient.address, amount),
                "{}",
                recipient.address
            );
        }
    }

    #[test]
    fn test_amount_spellings_commit_identically() {
        let address = "0x0101010101010101010101010101010101010101";
        let spellings = [
            format!(r#"[{{"address": "{address}", "amount": 1000}}]"#),
            format!(r#"[{{"address": "{address}", "amount": "1000"}}]"#),
            format!(r#"[{{"address": "{address}", "amount": "0x3e8"}}]"#),
        ];

        let roots: Vec<String> = spellings
            .iter()
            .map(|json| {
                let file = write_list(json);
                commit_file(file.path().to_path_buf(), ProofStyle::Compact).root
            })
            .collect();

        assert!(roots.iter().all(|r| r == &roots[0]));
        assert_eq!(decode(&roots[0]), reference_leaf(address, 1000));
    }

    #[test]
    fn test_json_report_round_trips_through_render() {
        let report = commit_file(bundled_list(), ProofStyle::Padded);
        let json = render(&report, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["root"], ROOT_FOUR);
        assert_eq!(value["proof_style"], "padded");
        assert_eq!(value["recipients"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn test_amount_beyond_u128() {
        let max = U256::MAX.to_string();
        let file = write_list(&format!(
            r#"[{{"address": "0x0202020202020202020202020202020202020202", "amount": "{max}"}},
                {{"address": "0x0303030303030303030303030303030303030303", "amount": "1"}}]"#
        ));

        let report = commit_file(file.path().to_path_buf(), ProofStyle::Compact);
        assert_eq!(report.recipients[0].amount, max);
        assert!(report.recipients.iter().all(|r| r.verifies));
    }

    // =============================================================================
    // REPORT → REDEMPTION
    // =============================================================================

    #[test]
    fn test_every_recipient_redeems_once() {
        let report = commit_file(bundled_list(), ProofStyle::Compact);
        let mut ledger = ClaimLedger::new(decode(&report.root));

        for r in &report.recipients {
            assert_eq!(ledger.claim(&r.address, &r.amount, &r.proof), Ok(()));
        }
        for r in &report.recipients {
            assert_eq!(
                ledger.claim(&r.address, &r.amount, &r.proof),
                Err("already claimed".to_string())
            );
        }
    }

    #[test]
    fn test_odd_list_redeems_with_padded_proofs() {
        let file = write_list(
            r#"[
                {"address": "0x0101010101010101010101010101010101010101", "amount": "10"},
                {"address": "0x0202020202020202020202020202020202020202", "amount": "20"},
                {"address": "0x0303030303030303030303030303030303030303", "amount": "30"},
                {"address": "0x0404040404040404040404040404040404040404", "amount": "40"},
                {"address": "0x0505050505050505050505050505050505050505", "amount": "50"}
            ]"#,
        );

        let compact = commit_file(file.path().to_path_buf(), ProofStyle::Compact);
        let padded = commit_file(file.path().to_path_buf(), ProofStyle::Padded);
        assert_eq!(compact.root, padded.root);

        let mut ledger = ClaimLedger::new(decode(&padded.root));
        for r in &padded.recipients {
            assert_eq!(ledger.claim(&r.address, &r.amount, &r.proof), Ok(()));
        }

        // Index 4 is self-paired on the first two levels; only the
        // top-level sibling makes it into the compact proof.
        let trailing = &compact.recipients[4];
        assert!(!trailing.verifies);
        assert_eq!(trailing.proof.len(), 1);
        assert_eq!(padded.recipients[4].proof.len(), 3);
        assert_eq!(compact.unverifiable().count(), 1);
    }

    // =============================================================================
    // FORGERY
    // =============================================================================

    #[test]
    fn test_forged_claims_refused() {
        let report = commit_file(bundled_list(), ProofStyle::Compact);
        let mut ledger = ClaimLedger::new(decode(&report.root));
        let alice = &report.recipients[0];
        let bob = &report.recipients[1];

        // inflated amount
        assert_eq!(
            ledger.claim(&alice.address, "26000000000000000000", &alice.proof),
            Err("invalid proof".to_string())
        );
        // someone else's proof
        assert_eq!(
            ledger.claim(&alice.address, &alice.amount, &bob.proof),
            Err("invalid proof".to_string())
        );
        // outsider
        assert_eq!(
            ledger.claim(
                "0x000000000000000000000000000000000000dead",
                &alice.amount,
                &alice.proof
            ),
            Err("invalid proof".to_string())
        );
        // malformed address never reaches verification
        assert!(ledger.claim("0xdead", &alice.amount, &alice.proof).is_err());

        // refused attempts do not burn the legitimate claim
        assert_eq!(ledger.claim(&alice.address, &alice.amount, &alice.proof), Ok(()));
    }
}
