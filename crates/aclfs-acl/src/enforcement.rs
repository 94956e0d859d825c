//! Permission enforcement along namespace paths.
//!
//! Reading a node requires a read grant on the node and on every ancestor up
//! to and including the root. Writing a node requires a write grant on the
//! node itself plus read access to its parent. The root is never writable.

use std::fmt;

use aclfs_core::{GroupId, NodeId, UserId};
use serde::{Deserialize, Serialize};

use crate::store::Acl;

/// Read-only view of a tree whose nodes carry ACLs.
pub trait AclTree {
    /// The ACL of `node`, or `None` if the node does not exist.
    fn acl(&self, node: NodeId) -> Option<&Acl>;

    /// The parent of `node`; `None` for the root or a missing node.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Absolute path of `node`, used in denial messages.
    fn path_of(&self, node: NodeId) -> String;
}

/// The kind of access being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Access {
    /// Read access
    Read,
    /// Write access
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Why an access check failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    /// No matching entry grants the access on `path`
    #[error("No {access} permission on {path}")]
    Missing {
        /// Path of the node lacking the grant
        path: String,
        /// The access that was required
        access: Access,
    },

    /// Writes to the root are never allowed
    #[error("Root is not writable")]
    RootNotWritable,
}

fn grants(
    tree: &impl AclTree,
    node: NodeId,
    user: UserId,
    group: GroupId,
    access: Access,
) -> bool {
    let entry = tree.acl(node).and_then(|acl| acl.find_entry(user, group));
    match (entry, access) {
        (Some(e), Access::Read) => e.permissions.read,
        (Some(e), Access::Write) => e.permissions.write,
        (None, _) => false,
    }
}

/// Check that `(user, group)` may read `node`.
///
/// Walks from `node` to the root; the first node without a read grant
/// denies the whole read.
pub fn check_read(
    tree: &impl AclTree,
    node: NodeId,
    user: UserId,
    group: GroupId,
) -> Result<(), Denial> {
    let mut current = Some(node);
    while let Some(id) = current {
        if !grants(tree, id, user, group, Access::Read) {
            let path = tree.path_of(id);
            tracing::trace!(%user, %group, path = %path, "Read denied");
            return Err(Denial::Missing {
                path,
                access: Access::Read,
            });
        }
        current = tree.parent(id);
    }
    Ok(())
}

/// Check that `(user, group)` may write `node`.
pub fn check_write(
    tree: &impl AclTree,
    node: NodeId,
    user: UserId,
    group: GroupId,
) -> Result<(), Denial> {
    let Some(parent) = tree.parent(node) else {
        return Err(Denial::RootNotWritable);
    };
    if !grants(tree, node, user, group, Access::Write) {
        let path = tree.path_of(node);
        tracing::trace!(%user, %group, path = %path, "Write denied");
        return Err(Denial::Missing {
            path,
            access: Access::Write,
        });
    }
    check_read(tree, parent, user, group)
}
