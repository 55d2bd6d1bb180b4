//! # CLI Configuration
//!
//! Layered configuration: command-line flags over environment over defaults.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AIRDROP_INPUT` | `crates/airdrop-cli/data/recipients.json` | Recipient list (JSON) |
//! | `AIRDROP_DUPLICATE_POLICY` | `warn` | `allow`, `warn` or `reject` |
//! | `AIRDROP_PROOF_STYLE` | `compact` | `compact` or `padded` |
//! | `AIRDROP_LOG_LEVEL` or `RUST_LOG` | `info` | Log filter directive |
//! | `AIRDROP_JSON_LOGS` | `false` | JSON log lines on stderr |

use std::env;
use std::path::PathBuf;

use airdrop_merkle::{DuplicatePolicy, MerkleConfig, ProofStyle};
use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::warn;

/// Default recipient list, relative to the workspace root.
pub const DEFAULT_INPUT: &str = "crates/airdrop-cli/data/recipients.json";

/// Report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Root line, then one block per recipient.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// make-merkle: compute the airdrop Merkle root and per-recipient proofs
#[derive(Parser, Debug, Default)]
#[command(name = "make-merkle")]
#[command(about = "Compute the airdrop Merkle root and every recipient's inclusion proof")]
pub struct Args {
    /// Recipient list: JSON array of {"address", "amount"} objects
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Handling of repeated addresses (allow, warn, reject)
    #[arg(long)]
    pub duplicates: Option<DuplicatePolicy>,

    /// Proof style (compact, padded)
    #[arg(long)]
    pub proof_style: Option<ProofStyle>,

    /// Verify every proof against the root; fail if any does not verify
    #[arg(long)]
    pub verify: bool,
}

/// An environment value that failed to parse and was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEnvValue {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub input: PathBuf,
    pub format: OutputFormat,
    pub merkle: MerkleConfig,
    pub verify: bool,
    pub log_level: String,
    pub json_logs: bool,
    /// Filled by `from_lookup`; reported by `warn_rejected` once logging is up.
    pub rejected_env: Vec<RejectedEnvValue>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            format: OutputFormat::Text,
            merkle: MerkleConfig::default(),
            verify: false,
            log_level: "info".to_string(),
            json_logs: false,
            rejected_env: Vec::new(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The recipient list does not exist.
    #[error("recipient list not found: {0}")]
    InputNotFound(PathBuf),
}

impl CliConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Unparseable values fall back to their defaults and are kept in
    /// `rejected_env`. Parsing usually runs before a subscriber exists, so
    /// nothing is logged here; call [`CliConfig::warn_rejected`] afterwards.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let mut rejected = Vec::new();

        Self {
            input: lookup("AIRDROP_INPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.input),

            format: defaults.format,

            merkle: MerkleConfig {
                duplicate_policy: parse_or_default(
                    "AIRDROP_DUPLICATE_POLICY",
                    lookup("AIRDROP_DUPLICATE_POLICY"),
                    defaults.merkle.duplicate_policy,
                    &mut rejected,
                ),
                proof_style: parse_or_default(
                    "AIRDROP_PROOF_STYLE",
                    lookup("AIRDROP_PROOF_STYLE"),
                    defaults.merkle.proof_style,
                    &mut rejected,
                ),
            },

            verify: defaults.verify,

            log_level: lookup("AIRDROP_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("AIRDROP_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),

            rejected_env: rejected,
        }
    }

    /// Emit one `warn!` per environment value that was replaced by its default.
    pub fn warn_rejected(&self) {
        for rejected in &self.rejected_env {
            warn!(
                key = rejected.key,
                value = %rejected.value,
                error = %rejected.reason,
                "ignoring invalid environment value"
            );
        }
    }

    /// Apply command-line flags on top.
    #[must_use]
    pub fn with_args(mut self, args: Args) -> Self {
        if let Some(input) = args.input {
            self.input = input;
        }
        if let Some(format) = args.format {
            self.format = format;
        }
        if let Some(policy) = args.duplicates {
            self.merkle.duplicate_policy = policy;
        }
        if let Some(style) = args.proof_style {
            self.merkle.proof_style = style;
        }
        self.verify |= args.verify;
        self
    }

    /// Check that the configuration can be acted on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input.is_file() {
            return Err(ConfigError::InputNotFound(self.input.clone()));
        }
        Ok(())
    }
}

fn parse_or_default<T>(
    key: &'static str,
    value: Option<String>,
    default: T,
    rejected: &mut Vec<RejectedEnvValue>,
) -> T
where
    T: std::str::FromStr<Err = String>,
{
    let Some(value) = value else {
        return default;
    };
    match value.parse::<T>() {
        Ok(parsed) => parsed,
        Err(reason) => {
            rejected.push(RejectedEnvValue { key, value, reason });
            default
        }
    }
}
