#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! aclfs Interpreter
//!
//! Parses the two-section command stream, executes it against a
//! [`World`](aclfs_namespace::World), and produces one [`Report`] per
//! reported line.
//!
//! # Modules
//!
//! - [`grammar`]: Pure line parsing for definitions, commands, and ACL blocks
//! - [`executor`]: Applies parsed lines to the world and classifies outcomes
//! - [`session`]: Line-at-a-time driver handling sections and ACL blocks
//! - [`report`]: Per-line report values and their text form

pub mod error;
pub mod executor;
pub mod grammar;
pub mod report;
pub mod session;

mod proptests;

// Re-exports for convenience
pub use error::{Error, Result};
pub use executor::Outcome;
pub use report::{Report, Status};
pub use session::Session;
