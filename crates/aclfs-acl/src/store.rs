//! Ordered per-node ACL storage.
//!
//! Entries are kept in insertion order and never reordered. Lookup returns
//! the first matching entry, so a wildcard inserted before a specific entry
//! shadows it.

use aclfs_core::{GroupId, Registry, UserId};
use serde::{Deserialize, Serialize};

use crate::policy::AclEntry;

/// The access control list of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    entries: Vec<AclEntry>,
}

impl Acl {
    /// Creates an empty ACL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an ACL holding a single entry.
    pub fn with_entry(entry: AclEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Returns the first entry matching `(user, group)` in insertion order.
    pub fn find_entry(&self, user: UserId, group: GroupId) -> Option<&AclEntry> {
        self.entries.iter().find(|e| e.matches(user, group))
    }

    /// Appends an entry unless one with the same `(user, group)` pair exists.
    ///
    /// Returns `false` when the entry was ignored; the existing entry is kept.
    pub fn add_entry(&mut self, entry: AclEntry) -> bool {
        if self.entries.iter().any(|e| e.same_principals(&entry)) {
            tracing::trace!(?entry, "Ignoring duplicate ACL entry");
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Replaces this ACL with a value copy of `source`, preserving order.
    pub fn copy_from(&mut self, source: &Acl) {
        self.clear();
        self.entries.extend(source.entries.iter().cloned());
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[AclEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the entries as `user.group perms` joined by `, `.
    pub fn render(&self, registry: &Registry) -> String {
        self.entries
            .iter()
            .map(|e| e.display(registry).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<AclEntry> for Acl {
    /// Builds an ACL with [`Acl::add_entry`] semantics: later duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = AclEntry>>(iter: I) -> Self {
        let mut acl = Acl::new();
        for entry in iter {
            acl.add_entry(entry);
        }
        acl
    }
}
