//! Path grammar for the simulated namespace.
//!
//! Paths are absolute, slash separated, and never normalized: `.` and `..`
//! are rejected rather than resolved, and empty components (`//` or a
//! trailing `/`) are errors. The bare root `/` is the only path that ends
//! with a slash.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default maximum length of one path component.
pub const MAX_COMPONENT_LEN: usize = 16;

/// Default maximum length of a full path.
pub const MAX_PATH_LEN: usize = 256;

/// Length limits applied to paths and their components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathLimits {
    /// Maximum characters in one component
    pub max_component_len: usize,
    /// Maximum characters in a full path
    pub max_path_len: usize,
}

impl Default for PathLimits {
    fn default() -> Self {
        Self {
            max_component_len: MAX_COMPONENT_LEN,
            max_path_len: MAX_PATH_LEN,
        }
    }
}

/// Validate a single component (file name).
///
/// Components are non-empty runs of ASCII letters, digits, and `.`, other
/// than the reserved names `.` and `..`.
pub fn validate_component(name: &str, limits: &PathLimits) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_name(name, "empty file name"));
    }
    if name == "." || name == ".." {
        return Err(Error::invalid_name(name, "reserved file name"));
    }
    if name.len() > limits.max_component_len {
        return Err(Error::invalid_name(
            name,
            format!("longer than {} characters", limits.max_component_len),
        ));
    }
    if let Some(c) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '.')) {
        return Err(Error::invalid_name(name, format!("illegal character '{c}'")));
    }
    Ok(())
}

/// Validate a full path and return its components.
///
/// The root path yields no components.
pub fn components<'a>(path: &'a str, limits: &PathLimits) -> Result<Vec<&'a str>> {
    if path.is_empty() {
        return Err(Error::invalid_path(path, "empty path"));
    }
    if !path.starts_with('/') {
        return Err(Error::invalid_path(path, "path must start with /"));
    }
    if path.len() > limits.max_path_len {
        return Err(Error::invalid_path(
            path,
            format!("longer than {} characters", limits.max_path_len),
        ));
    }
    if path == "/" {
        return Ok(Vec::new());
    }
    if path.ends_with('/') {
        return Err(Error::invalid_path(path, "path must not end with /"));
    }

    let mut parts = Vec::new();
    for component in path[1..].split('/') {
        if component.is_empty() {
            return Err(Error::invalid_path(path, "empty path component"));
        }
        validate_component(component, limits).map_err(|e| match e {
            Error::InvalidName { name, reason } => {
                Error::invalid_path(path, format!("component '{name}' is {reason}"))
            }
            other => other,
        })?;
        parts.push(component);
    }
    Ok(parts)
}

/// Validate a path, discarding its components.
pub fn validate_path(path: &str, limits: &PathLimits) -> Result<()> {
    components(path, limits).map(|_| ())
}

/// Split a path into its parent path and final component.
///
/// Returns `None` for the root, which has no parent. The input is not
/// validated.
pub fn split_parent(path: &str) -> Option<(&str, &str)> {
    if path == "/" {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some(("/", &path[1..])),
        Some(pos) => Some((&path[..pos], &path[pos + 1..])),
        None => None,
    }
}

/// Join a parent path and a component.
pub fn join_path(base: &str, name: &str) -> String {
    if base == "/" {
        format!("/{name}")
    } else {
        format!("{base}/{name}")
    }
}
