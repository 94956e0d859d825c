//! Execution engine: applies parsed lines to a [`World`].
//!
//! Each command yields an [`Outcome`]. Failures are not rolled back: a user
//! registered by a definition line stays registered even if creating the
//! user's file fails afterwards.

use std::fmt;

use aclfs_acl::{Acl, AclEntry, AclTree, Permissions, Principal, check_read, check_write};
use aclfs_core::path::split_parent;
use aclfs_core::{GroupId, NodeId, UserId};
use aclfs_namespace::World;

use crate::error::{Error, Result};
use crate::grammar::{AclSpec, Command, CommandKind, Definition};

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command was carried out
    Allowed,
    /// The request was well formed but not permitted
    Denied(String),
    /// The request was malformed or referred to something missing
    Invalid(String),
}

impl Outcome {
    /// Classifies a command result.
    pub fn from_result(result: Result<()>) -> Self {
        match result {
            Ok(()) => Self::Allowed,
            Err(e) if e.is_denial() => Self::Denied(e.to_string()),
            Err(e) => Self::Invalid(e.to_string()),
        }
    }

    /// Returns `true` for [`Outcome::Allowed`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// The reason attached to a failed outcome.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Denied(reason) | Self::Invalid(reason) => Some(reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed => write!(f, "allowed"),
            Self::Denied(_) => write!(f, "denied"),
            Self::Invalid(_) => write!(f, "invalid"),
        }
    }
}

// ============================================================================
// Definition section
// ============================================================================

/// Applies one definition line.
///
/// The first mention of a user must name a file, which is created with a
/// `user.* rw` ACL; later mentions must not.
pub fn define(world: &mut World, definition: &Definition) -> Result<()> {
    let known = world.registry.find_user(&definition.user);
    match (known, &definition.path) {
        (None, None) => {
            return Err(Error::MissingFile {
                user: definition.user.clone(),
            })
        }
        (Some(_), Some(_)) => {
            return Err(Error::UnexpectedFile {
                user: definition.user.clone(),
            })
        }
        _ => {}
    }

    let user = world.registry.find_or_create_user(&definition.user)?;
    let group = world.registry.find_or_create_group(&definition.group)?;
    world.registry.add_membership(user, group);

    if let Some(path) = &definition.path {
        let node = world.namespace.create_path(path)?;
        if let Some(n) = world.namespace.node_mut(node) {
            n.acl.add_entry(AclEntry::new(
                Principal::Specific(user),
                Principal::Wildcard,
                Permissions::READ_WRITE,
            ));
        }
        world.registry.set_home(user, node)?;
        tracing::debug!(user = %definition.user, path = %path, "Defined user file");
    }
    Ok(())
}

/// Closes the definition section: every user file becomes world readable.
pub fn end_definitions(world: &mut World) {
    world.publish_homes();
}

// ============================================================================
// Command section
// ============================================================================

/// Executes one command against the world.
///
/// `block` holds the parsed ACL block for CREATE and ACL; it is ignored for
/// the other commands.
pub fn execute(world: &mut World, command: &Command, block: &[AclSpec]) -> Outcome {
    let result = match command.kind {
        CommandKind::Read => read(world, command),
        CommandKind::Write => write(world, command),
        CommandKind::Create => create(world, command, block),
        CommandKind::Delete => delete(world, command),
        CommandKind::Acl => replace_acl(world, command, block),
    };
    let outcome = Outcome::from_result(result);
    tracing::debug!(
        command = %command.kind,
        user = %command.user,
        group = %command.group,
        path = %command.path,
        outcome = %outcome,
        "Executed command"
    );
    outcome
}

fn acting(world: &World, command: &Command) -> Result<(UserId, GroupId)> {
    let user = world
        .registry
        .find_user(&command.user)
        .ok_or_else(|| Error::UnknownUser {
            name: command.user.clone(),
        })?;
    let group = world
        .registry
        .find_group(&command.group)
        .ok_or_else(|| Error::UnknownGroup {
            name: command.group.clone(),
        })?;
    if !world.registry.belongs(user, group) {
        return Err(Error::NotAMember {
            user: command.user.clone(),
            group: command.group.clone(),
        });
    }
    Ok((user, group))
}

fn existing(world: &World, path: &str) -> Result<NodeId> {
    world
        .namespace
        .resolve(path)?
        .ok_or_else(|| aclfs_core::Error::not_found(path).into())
}

fn resolve_block(world: &mut World, block: &[AclSpec]) -> Result<Acl> {
    let mut acl = Acl::new();
    for spec in block {
        let entry = AclEntry::from_names(
            &mut world.registry,
            spec.user.clone(),
            spec.group.clone(),
            spec.permissions,
        )?;
        acl.add_entry(entry);
    }
    Ok(acl)
}

fn read(world: &World, command: &Command) -> Result<()> {
    let (user, group) = acting(world, command)?;
    let node = existing(world, &command.path)?;
    check_read(&world.namespace, node, user, group)?;
    Ok(())
}

fn write(world: &World, command: &Command) -> Result<()> {
    let (user, group) = acting(world, command)?;
    let node = existing(world, &command.path)?;
    check_write(&world.namespace, node, user, group)?;
    Ok(())
}

fn create(world: &mut World, command: &Command, block: &[AclSpec]) -> Result<()> {
    let (user, group) = acting(world, command)?;
    let target = world.namespace.resolve(&command.path)?;
    let (parent_path, name) = split_parent(&command.path).ok_or(Error::CreateRoot)?;
    let parent = world
        .namespace
        .resolve(parent_path)?
        .ok_or_else(|| Error::ParentNotFound {
            path: parent_path.to_string(),
        })?;
    check_write(&world.namespace, parent, user, group)?;
    if target.is_some() {
        return Err(aclfs_core::Error::already_exists(&command.path).into());
    }

    let acl = if block.is_empty() {
        world
            .namespace
            .acl(parent)
            .cloned()
            .unwrap_or_default()
    } else {
        resolve_block(world, block)?
    };
    let node = world.namespace.create_child(parent, name)?;
    if let Some(n) = world.namespace.node_mut(node) {
        n.acl.copy_from(&acl);
    }
    Ok(())
}

fn delete(world: &mut World, command: &Command) -> Result<()> {
    let (user, group) = acting(world, command)?;
    let node = existing(world, &command.path)?;
    let parent = world.namespace.parent(node).ok_or(Error::DeleteRoot)?;
    let has_children = world
        .namespace
        .node(node)
        .is_some_and(|n| n.has_children());
    if has_children {
        return Err(Error::HasChildren {
            path: command.path.clone(),
        });
    }
    check_write(&world.namespace, parent, user, group)?;

    if let Some((_, name)) = split_parent(&command.path) {
        world.namespace.remove_child(parent, name);
    }
    Ok(())
}

fn replace_acl(world: &mut World, command: &Command, block: &[AclSpec]) -> Result<()> {
    let (user, group) = acting(world, command)?;
    let node = existing(world, &command.path)?;
    check_write(&world.namespace, node, user, group)?;
    if block.is_empty() {
        return Err(Error::EmptyAcl);
    }

    let acl = resolve_block(world, block)?;
    if let Some(n) = world.namespace.node_mut(node) {
        n.acl.copy_from(&acl);
    }
    Ok(())
}
