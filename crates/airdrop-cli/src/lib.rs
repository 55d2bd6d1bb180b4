//! # Airdrop CLI
//!
//! Loads a recipient list, commits it and renders the root with every
//! recipient's leaf and proof. The `make-merkle` binary is a thin shell
//! around [`run`] and [`render`].

pub mod config;
pub mod telemetry;

use anyhow::{bail, Context, Result};
use tracing::{error, info};

use airdrop_merkle::{AirdropReport, CommitmentService, JsonEntitlementSource};

pub use config::{Args, CliConfig, ConfigError, OutputFormat, RejectedEnvValue, DEFAULT_INPUT};
pub use telemetry::{init_logging, TelemetryError};

/// Install logging for `config`, then warn about environment values it
/// replaced with defaults.
pub fn init(config: &CliConfig) -> Result<()> {
    init_logging(config).context("failed to initialize logging")?;
    config.warn_rejected();
    Ok(())
}

/// Commit the configured recipient list and build its report.
///
/// With `verify` set, any recipient whose proof does not reach the root
/// fails the run.
pub fn run(config: &CliConfig) -> Result<AirdropReport> {
    config.validate()?;

    info!(
        input = %config.input.display(),
        duplicates = ?config.merkle.duplicate_policy,
        proof_style = ?config.merkle.proof_style,
        "committing recipient list"
    );

    let source = JsonEntitlementSource::from_path(&config.input);
    let mut service = CommitmentService::new(config.merkle);
    service
        .commit_from(&source)
        .with_context(|| format!("failed to commit {}", config.input.display()))?;

    let report = service.report().context("failed to build report")?;

    if config.verify {
        let failed: Vec<usize> = report.unverifiable().map(|r| r.index).collect();
        if !failed.is_empty() {
            for recipient in report.unverifiable() {
                error!(
                    index = recipient.index,
                    address = %recipient.address,
                    "proof does not reach root"
                );
            }
            bail!(
                "{} of {} proofs do not verify (indices {:?}); try --proof-style padded",
                failed.len(),
                report.leaf_count,
                failed
            );
        }
        info!(proofs = report.leaf_count, "all proofs verified");
    }

    Ok(report)
}

/// Render the report in the configured format.
pub fn render(report: &AirdropReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => report.to_json().context("failed to serialize report"),
    }
}
