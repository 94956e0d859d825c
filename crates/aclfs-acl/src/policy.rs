//! ACL entry types: principals, permission sets, and entries.

use std::fmt;
use std::str::FromStr;

use aclfs_core::{GroupId, Registry, Result as CoreResult, UserId};
use serde::{Deserialize, Serialize};

use crate::error::Error;

// ============================================================================
// Principal
// ============================================================================

/// One slot of an ACL entry: a specific identity or the wildcard `*`.
///
/// The type parameter is the identity representation, e.g. a parsed name
/// (`Principal<String>`) or a registry id (`Principal<UserId>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Principal<T> {
    /// Matches exactly this identity.
    Specific(T),
    /// Matches any identity.
    Wildcard,
}

impl<T: PartialEq> Principal<T> {
    /// Returns `true` if this principal admits `id`.
    pub fn admits(&self, id: &T) -> bool {
        match self {
            Self::Specific(own) => own == id,
            Self::Wildcard => true,
        }
    }
}

impl<T> Principal<T> {
    /// Returns `true` for the wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Converts the specific identity, keeping wildcards as they are.
    pub fn try_map<U, E, F>(self, f: F) -> std::result::Result<Principal<U>, E>
    where
        F: FnOnce(T) -> std::result::Result<U, E>,
    {
        match self {
            Self::Specific(id) => Ok(Principal::Specific(f(id)?)),
            Self::Wildcard => Ok(Principal::Wildcard),
        }
    }
}

impl Principal<String> {
    /// Parses `*` as the wildcard and anything else as a specific name.
    pub fn parse(token: &str) -> Self {
        if token == "*" {
            Self::Wildcard
        } else {
            Self::Specific(token.to_string())
        }
    }
}

impl<T: fmt::Display> fmt::Display for Principal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Specific(id) => write!(f, "{id}"),
            Self::Wildcard => write!(f, "*"),
        }
    }
}

// ============================================================================
// Permissions
// ============================================================================

/// Read/write permission set of an ACL entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permissions {
    /// Read permission
    pub read: bool,
    /// Write permission
    pub write: bool,
}

impl Permissions {
    /// No permission (`-`).
    pub const NONE: Permissions = Permissions::new(false, false);
    /// Read only (`r`).
    pub const READ: Permissions = Permissions::new(true, false);
    /// Write only (`w`).
    pub const WRITE: Permissions = Permissions::new(false, true);
    /// Read and write (`rw`).
    pub const READ_WRITE: Permissions = Permissions::new(true, true);

    /// Creates a permission set.
    pub const fn new(read: bool, write: bool) -> Self {
        Self { read, write }
    }

    /// Textual form: `r`, `w`, `rw`, or `-`.
    pub fn as_text(&self) -> &'static str {
        match (self.read, self.write) {
            (true, true) => "rw",
            (true, false) => "r",
            (false, true) => "w",
            (false, false) => "-",
        }
    }
}

impl FromStr for Permissions {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "r" => Ok(Self::READ),
            "w" => Ok(Self::WRITE),
            "rw" => Ok(Self::READ_WRITE),
            "-" => Ok(Self::NONE),
            other => Err(Error::InvalidPermissions {
                text: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

// ============================================================================
// AclEntry
// ============================================================================

/// One `(user, group) -> permissions` rule attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AclEntry {
    /// User slot
    pub user: Principal<UserId>,
    /// Group slot
    pub group: Principal<GroupId>,
    /// Granted permissions
    pub permissions: Permissions,
}

impl AclEntry {
    /// Creates an entry.
    pub fn new(
        user: Principal<UserId>,
        group: Principal<GroupId>,
        permissions: Permissions,
    ) -> Self {
        Self {
            user,
            group,
            permissions,
        }
    }

    /// The `*.* <permissions>` entry.
    pub fn everyone(permissions: Permissions) -> Self {
        Self::new(Principal::Wildcard, Principal::Wildcard, permissions)
    }

    /// Resolves parsed names against the registry, registering unknown names.
    pub fn from_names(
        registry: &mut Registry,
        user: Principal<String>,
        group: Principal<String>,
        permissions: Permissions,
    ) -> CoreResult<Self> {
        let user = user.try_map(|name| registry.find_or_create_user(&name))?;
        let group = group.try_map(|name| registry.find_or_create_group(&name))?;
        Ok(Self::new(user, group, permissions))
    }

    /// Returns `true` if this entry applies to `(user, group)`.
    pub fn matches(&self, user: UserId, group: GroupId) -> bool {
        self.user.admits(&user) && self.group.admits(&group)
    }

    /// Returns `true` if both slots equal those of `other`.
    pub fn same_principals(&self, other: &AclEntry) -> bool {
        self.user == other.user && self.group == other.group
    }

    /// Renders the entry as `user.group perms` using registry names.
    pub fn display<'a>(&'a self, registry: &'a Registry) -> EntryDisplay<'a> {
        EntryDisplay {
            entry: self,
            registry,
        }
    }
}

/// Display adapter returned by [`AclEntry::display`].
pub struct EntryDisplay<'a> {
    entry: &'a AclEntry,
    registry: &'a Registry,
}

impl fmt::Display for EntryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry.user {
            Principal::Specific(id) => match self.registry.user(*id) {
                Some(user) => f.write_str(user.name())?,
                None => write!(f, "{id}")?,
            },
            Principal::Wildcard => f.write_str("*")?,
        }
        f.write_str(".")?;
        match &self.entry.group {
            Principal::Specific(id) => match self.registry.group(*id) {
                Some(group) => f.write_str(group.name())?,
                None => write!(f, "{id}")?,
            },
            Principal::Wildcard => f.write_str("*")?,
        }
        write!(f, " {}", self.entry.permissions)
    }
}
