//! Index-based identifiers for arena-allocated nodes and registry entries.
//!
//! Identifiers are plain indices into the owning collection. They are only
//! meaningful for the namespace arena or [`Registry`](crate::Registry) that
//! issued them.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(usize);

        impl $name {
            /// Creates an identifier from a raw index.
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the raw index.
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

index_id!(
    /// Identifier of a node in the namespace arena.
    ///
    /// Slots are never reused, so a `NodeId` of a deleted node simply stops
    /// resolving.
    NodeId,
    "node"
);

index_id!(
    /// Identifier of a user in the [`Registry`](crate::Registry).
    UserId,
    "user"
);

index_id!(
    /// Identifier of a group in the [`Registry`](crate::Registry).
    GroupId,
    "group"
);

impl NodeId {
    /// The root node always occupies the first arena slot.
    pub const ROOT: NodeId = NodeId(0);

    /// Returns `true` if this is the root node.
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}
