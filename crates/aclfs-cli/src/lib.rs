//! # aclfs-cli
//!
//! Command-line runner for the aclfs namespace simulator.
//!
//! Reads a script of definitions and commands, prints one report per line,
//! and optionally dumps the final namespace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

pub use cli::Args;
pub use config::{AclfsConfig, OutputFormat};
pub use error::{Error, Result};
pub use runner::{RunSummary, run};
