//! # aclfs-namespace
//!
//! The namespace tree of the aclfs simulator and the [`World`] aggregate that
//! owns it together with the identity registry.
//!
//! Nodes are stored in an arena and addressed by [`NodeId`](aclfs_core::NodeId);
//! the tree implements [`AclTree`](aclfs_acl::AclTree) so the ACL engine can
//! walk it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod tree;
pub mod world;

pub use tree::{Namespace, Node};
pub use world::{NodeSnapshot, World};
