#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! aclfs Core Library
//!
//! Shared building blocks for the aclfs namespace simulator. This crate has no
//! internal aclfs dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and the `Result` alias
//! - [`types`]: Index-based identifiers for nodes, users, and groups
//! - [`path`]: Path grammar, validation limits, and path helpers
//! - [`identity`]: The user/group registry with symmetric membership

pub mod error;
pub mod identity;
pub mod path;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use identity::{Group, Registry, User};
pub use path::PathLimits;
pub use types::{GroupId, NodeId, UserId};
