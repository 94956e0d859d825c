//! Error types for the aclfs core library.

/// Errors raised by path validation, the namespace, and the identity registry.
///
/// All variants carry enough context to be printed verbatim as the reason of
/// a rejected input line.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Path does not follow the path grammar
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path
        path: String,
        /// What went wrong
        reason: String,
    },

    /// A single path component is not a legal file name
    #[error("Invalid file name '{name}': {reason}")]
    InvalidName {
        /// The offending component
        name: String,
        /// What went wrong
        reason: String,
    },

    /// A user or group name is malformed
    #[error("Invalid identity '{name}': {reason}")]
    InvalidIdentity {
        /// The offending user or group name
        name: String,
        /// What went wrong
        reason: String,
    },

    /// The path already names a file
    #[error("File already exists: {path}")]
    AlreadyExists {
        /// Path that already exists
        path: String,
    },

    /// The path does not name a file
    #[error("File not found: {path}")]
    NotFound {
        /// Path that was not found
        path: String,
    },

    /// A sibling with the same name is already linked under the parent
    #[error("Duplicate name '{name}' under {parent}")]
    DuplicateName {
        /// Name that collided
        name: String,
        /// Path of the parent node
        parent: String,
    },

    /// The user already owns a file
    #[error("User '{user}' already owns a file")]
    HomeAlreadySet {
        /// User name
        user: String,
    },
}

/// Convenience `Result` type alias for aclfs core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new invalid path error.
    pub fn invalid_path<P, R>(path: P, reason: R) -> Self
    where
        P: Into<String>,
        R: Into<String>,
    {
        Error::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new invalid file name error.
    pub fn invalid_name<N, R>(name: N, reason: R) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        Error::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new invalid identity error.
    pub fn invalid_identity<N, R>(name: N, reason: R) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        Error::InvalidIdentity {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new "already exists" error.
    pub fn already_exists<P: Into<String>>(path: P) -> Self {
        Error::AlreadyExists { path: path.into() }
    }

    /// Creates a new "not found" error.
    pub fn not_found<P: Into<String>>(path: P) -> Self {
        Error::NotFound { path: path.into() }
    }
}
