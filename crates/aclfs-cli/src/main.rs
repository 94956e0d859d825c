//! aclfs CLI
//!
//! Runs an ACL command script against a fresh simulated namespace.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader, BufWriter};

use aclfs_cli::{AclfsConfig, Args};
use anyhow::{Context, Result};
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AclfsConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Logs go to stderr; stdout carries only reports
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_filter(&config).into()),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());

    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            aclfs_cli::run(&config, BufReader::new(file), out)?
        }
        None => aclfs_cli::run(&config, io::stdin().lock(), out)?,
    };

    tracing::debug!(reported = summary.total(), "Done");
    Ok(())
}
