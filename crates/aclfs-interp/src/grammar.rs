//! Line grammar for both input sections.
//!
//! ```text
//! definition  := identity [ ' ' path ]
//! command     := COMMAND ' ' identity ' ' path
//! acl-line    := principal '.' principal ' ' permissions
//! identity    := name '.' name
//! principal   := name | '*'
//! COMMAND     := READ | WRITE | CREATE | DELETE | ACL
//! ```
//!
//! Names are lowercase ASCII letters. Tokens are separated by exactly one
//! space. Parsing is pure: nothing here touches the world.

use std::fmt;

use aclfs_acl::{Permissions, Principal};
use aclfs_core::identity::validate_identity;
use aclfs_core::path::{self, PathLimits};

use crate::error::{Error, Result};

/// Line ending the definition section and every ACL block.
pub const SECTION_END: &str = ".";

/// A command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `READ`
    Read,
    /// `WRITE`
    Write,
    /// `CREATE`, followed by an ACL block
    Create,
    /// `DELETE`
    Delete,
    /// `ACL`, followed by an ACL block
    Acl,
}

impl CommandKind {
    /// Parses a command keyword.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "READ" => Some(Self::Read),
            "WRITE" => Some(Self::Write),
            "CREATE" => Some(Self::Create),
            "DELETE" => Some(Self::Delete),
            "ACL" => Some(Self::Acl),
            _ => None,
        }
    }

    /// The keyword as written in the input.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Create => "CREATE",
            Self::Delete => "DELETE",
            Self::Acl => "ACL",
        }
    }

    /// Returns `true` if the command line is followed by an ACL block.
    pub fn takes_acl_block(&self) -> bool {
        matches!(self, Self::Create | Self::Acl)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed definition line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// User name
    pub user: String,
    /// Group name
    pub group: String,
    /// File path, only on the user's first mention
    pub path: Option<String>,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The command keyword
    pub kind: CommandKind,
    /// Acting user
    pub user: String,
    /// Acting group
    pub group: String,
    /// Target path
    pub path: String,
}

/// A parsed ACL block line, with names not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclSpec {
    /// User slot
    pub user: Principal<String>,
    /// Group slot
    pub group: Principal<String>,
    /// Granted permissions
    pub permissions: Permissions,
}

fn tokens(line: &str) -> Result<Vec<&str>> {
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(Error::syntax("tokens must be separated by a single space"));
    }
    Ok(parts)
}

fn split_identity(token: &str) -> Result<(&str, &str)> {
    token
        .split_once('.')
        .ok_or_else(|| Error::syntax(format!("expected <user>.<group>, found '{token}'")))
}

fn principal(name: &str) -> Result<Principal<String>> {
    if name == "*" {
        return Ok(Principal::Wildcard);
    }
    validate_identity(name)?;
    Ok(Principal::Specific(name.to_string()))
}

/// Parses `<user>.<group>` with no wildcards.
pub fn parse_identity(token: &str) -> Result<(String, String)> {
    let (user, group) = split_identity(token)?;
    validate_identity(user)?;
    validate_identity(group)?;
    Ok((user.to_string(), group.to_string()))
}

/// Parses a definition line.
pub fn parse_definition(line: &str, limits: &PathLimits) -> Result<Definition> {
    let parts = tokens(line)?;
    let (identity, file) = match parts.as_slice() {
        [identity] => (*identity, None),
        [identity, file] => (*identity, Some(*file)),
        _ => {
            return Err(Error::syntax("expected <user>.<group> optionally followed by a path"));
        }
    };
    let (user, group) = parse_identity(identity)?;
    if let Some(file) = file {
        path::validate_path(file, limits)?;
    }
    Ok(Definition {
        user,
        group,
        path: file.map(str::to_string),
    })
}

/// Returns the command keyword of a line, if its first token is one.
///
/// Used to decide whether an ACL block follows even when the rest of the
/// line is malformed.
pub fn command_kind(line: &str) -> Option<CommandKind> {
    line.split(' ').next().and_then(CommandKind::from_token)
}

/// Parses a command line.
pub fn parse_command(line: &str, limits: &PathLimits) -> Result<Command> {
    let parts = tokens(line)?;
    let [keyword, identity, file] = parts.as_slice() else {
        return Err(Error::syntax("expected <COMMAND> <user>.<group> <path>"));
    };
    let kind = CommandKind::from_token(keyword)
        .ok_or_else(|| Error::syntax(format!("unknown command '{keyword}'")))?;
    let (user, group) = parse_identity(identity)?;
    path::validate_path(file, limits)?;
    Ok(Command {
        kind,
        user,
        group,
        path: (*file).to_string(),
    })
}

/// Parses one line of an ACL block.
pub fn parse_acl_line(line: &str) -> Result<AclSpec> {
    let parts = tokens(line)?;
    let [identity, permissions] = parts.as_slice() else {
        return Err(Error::syntax("expected <user>.<group> <permissions>"));
    };
    let (user, group) = split_identity(identity)?;
    Ok(AclSpec {
        user: principal(user)?,
        group: principal(group)?,
        permissions: permissions.parse()?,
    })
}
