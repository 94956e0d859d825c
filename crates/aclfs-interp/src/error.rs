//! Error types for the interpreter and execution engine.

use aclfs_acl::Denial;

/// Errors produced while parsing or executing one input line.
///
/// Every error maps to exactly one report status: see [`Error::is_denial`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Error from the core library (paths, names, registry)
    #[error(transparent)]
    Core(#[from] aclfs_core::Error),

    /// Error while building ACL entries
    #[error(transparent)]
    Acl(#[from] aclfs_acl::Error),

    /// Permission check failed
    #[error(transparent)]
    Denied(#[from] Denial),

    /// Malformed line
    #[error("Syntax error: {message}")]
    Syntax {
        /// What went wrong
        message: String,
    },

    /// An ACL block ran into the end of input or a blank line
    #[error("ACL block is not terminated")]
    UnterminatedBlock,

    /// ACL command with no entries
    #[error("ACL can't be empty")]
    EmptyAcl,

    /// A user's first definition line has no file
    #[error("First mention of user '{user}' must name a file")]
    MissingFile {
        /// User name
        user: String,
    },

    /// A later definition line of a user names a file
    #[error("Only the first mention of user '{user}' may name a file")]
    UnexpectedFile {
        /// User name
        user: String,
    },

    /// Acting user is not registered
    #[error("Unknown user '{name}'")]
    UnknownUser {
        /// User name
        name: String,
    },

    /// Acting group is not registered
    #[error("Unknown group '{name}'")]
    UnknownGroup {
        /// Group name
        name: String,
    },

    /// Acting user is not in the acting group
    #[error("User '{user}' does not belong to group '{group}'")]
    NotAMember {
        /// User name
        user: String,
        /// Group name
        group: String,
    },

    /// The directory a file would be created in does not exist
    #[error("Parent directory not found: {path}")]
    ParentNotFound {
        /// Path of the missing parent
        path: String,
    },

    /// CREATE targeting `/`
    #[error("Cannot create the root directory")]
    CreateRoot,

    /// DELETE targeting `/`
    #[error("Cannot delete the root directory")]
    DeleteRoot,

    /// DELETE of a node that still has children
    #[error("Cannot delete {path}: directory is not empty")]
    HasChildren {
        /// Path of the node
        path: String,
    },
}

/// Convenience `Result` type alias for interpreter operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this error is a policy denial (`N`) rather than an
    /// invalid request (`X`).
    ///
    /// Authorization failures and structural violations on well-formed
    /// requests are denials; everything else is invalid.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            Error::Denied(_) | Error::DeleteRoot | Error::HasChildren { .. }
        )
    }

    /// Creates a new syntax error.
    pub fn syntax<S: Into<String>>(message: S) -> Self {
        Error::Syntax {
            message: message.into(),
        }
    }
}
