//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AclfsConfig, OutputFormat};

/// aclfs - run an ACL command script against a simulated namespace
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "aclfs")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input script; reads standard input when omitted
    pub input: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, env = "ACLFS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the final namespace after the reports
    #[arg(long)]
    pub dump_tree: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Apply flag overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut AclfsConfig) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.dump_tree {
            config.output.dump_tree = true;
        }
    }

    /// The default log filter, raised by `-v` flags.
    pub fn log_filter(&self, config: &AclfsConfig) -> String {
        match self.verbose {
            0 => config.logging.level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }
}
