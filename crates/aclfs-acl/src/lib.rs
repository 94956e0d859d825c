//! # aclfs-acl
//!
//! Access control lists for the aclfs namespace simulator.
//!
//! This crate implements the ACL engine:
//! - Principals with explicit wildcards
//! - Read/write permission sets and their textual form
//! - Ordered per-node ACLs with first-match-wins lookup
//! - Read and write enforcement along a path to the root

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod enforcement;
pub mod error;
pub mod policy;
pub mod store;

mod proptests;

pub use enforcement::{Access, AclTree, Denial, check_read, check_write};
pub use error::{Error, Result};
pub use policy::{AclEntry, Permissions, Principal};
pub use store::Acl;
