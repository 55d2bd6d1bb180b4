//! make-merkle: compute the airdrop Merkle root and every recipient's proof.
//!
//! ## Usage
//!
//! ```bash
//! make-merkle --input recipients.json --format json --verify
//! ```
//!
//! The report goes to stdout, logs to stderr.

use anyhow::Result;
use clap::Parser;

use airdrop_cli::{init, render, run, Args, CliConfig};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = CliConfig::from_env().with_args(args);

    init(&config)?;

    let report = run(&config)?;
    let output = render(&report, config.format)?;
    print!("{output}");

    Ok(())
}
