//! Identity registry: users, groups, and their membership.
//!
//! Users and groups are created lazily on first reference and never removed.
//! Membership is kept on both sides so either end can be queried directly.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};
use crate::types::{GroupId, NodeId, UserId};

/// Validate a user or group name: a non-empty run of lowercase ASCII letters.
pub fn validate_identity(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_identity(name, "name is empty"));
    }
    if let Some(c) = name.chars().find(|c| !c.is_ascii_lowercase()) {
        return Err(Error::invalid_identity(name, format!("illegal character '{c}'")));
    }
    Ok(())
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    groups: BTreeSet<GroupId>,
    home: Option<NodeId>,
}

impl User {
    /// The user name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Groups this user belongs to.
    pub fn groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.groups.iter().copied()
    }

    /// The file assigned to this user in the definition section, if any.
    pub fn home(&self) -> Option<NodeId> {
        self.home
    }
}

/// A registered group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    members: BTreeSet<UserId>,
}

impl Group {
    /// The group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Users belonging to this group.
    pub fn members(&self) -> impl Iterator<Item = UserId> + '_ {
        self.members.iter().copied()
    }
}

/// Owner of every user and group in a simulation.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    users: Vec<User>,
    groups: Vec<Group>,
    user_index: HashMap<String, UserId>,
    group_index: HashMap<String, GroupId>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a user by exact name.
    pub fn find_user(&self, name: &str) -> Option<UserId> {
        self.user_index.get(name).copied()
    }

    /// Looks up a group by exact name.
    pub fn find_group(&self, name: &str) -> Option<GroupId> {
        self.group_index.get(name).copied()
    }

    /// Returns the existing user with this name or registers a new one.
    pub fn find_or_create_user(&mut self, name: &str) -> Result<UserId> {
        if let Some(id) = self.find_user(name) {
            return Ok(id);
        }
        validate_identity(name)?;

        let id = UserId::new(self.users.len());
        self.users.push(User {
            name: name.to_string(),
            groups: BTreeSet::new(),
            home: None,
        });
        self.user_index.insert(name.to_string(), id);
        tracing::trace!(user = name, %id, "Registered user");
        Ok(id)
    }

    /// Returns the existing group with this name or registers a new one.
    pub fn find_or_create_group(&mut self, name: &str) -> Result<GroupId> {
        if let Some(id) = self.find_group(name) {
            return Ok(id);
        }
        validate_identity(name)?;

        let id = GroupId::new(self.groups.len());
        self.groups.push(Group {
            name: name.to_string(),
            members: BTreeSet::new(),
        });
        self.group_index.insert(name.to_string(), id);
        tracing::trace!(group = name, %id, "Registered group");
        Ok(id)
    }

    /// Adds `user` to `group` on both sides. Repeating it is a no-op.
    pub fn add_membership(&mut self, user: UserId, group: GroupId) {
        if let Some(u) = self.users.get_mut(user.index()) {
            u.groups.insert(group);
        }
        if let Some(g) = self.groups.get_mut(group.index()) {
            g.members.insert(user);
        }
    }

    /// Returns `true` if `user` is a member of `group`.
    pub fn belongs(&self, user: UserId, group: GroupId) -> bool {
        self.users
            .get(user.index())
            .is_some_and(|u| u.groups.contains(&group))
    }

    /// Gets a user by id.
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(id.index())
    }

    /// Gets a group by id.
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.index())
    }

    /// Records the file a user owns. It can only be set once.
    pub fn set_home(&mut self, user: UserId, node: NodeId) -> Result<()> {
        let Some(u) = self.users.get_mut(user.index()) else {
            return Err(Error::invalid_identity(user.to_string(), "unknown user"));
        };
        if u.home.is_some() {
            return Err(Error::HomeAlreadySet {
                user: u.name.clone(),
            });
        }
        u.home = Some(node);
        Ok(())
    }

    /// Iterates over all users in registration order.
    pub fn users(&self) -> impl Iterator<Item = (UserId, &User)> {
        self.users
            .iter()
            .enumerate()
            .map(|(i, u)| (UserId::new(i), u))
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of registered groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
