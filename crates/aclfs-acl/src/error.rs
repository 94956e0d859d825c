//! Error types for aclfs-acl

use thiserror::Error;

/// Result type alias for aclfs-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building ACL entries
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from aclfs-core
    #[error(transparent)]
    Core(#[from] aclfs_core::Error),

    /// Permission text is not one of `r`, `w`, `rw`, `-`
    #[error("Invalid permissions '{text}': expected r, w, rw or -")]
    InvalidPermissions {
        /// The rejected text
        text: String,
    },
}
