//! Logical repository paths
//!
//! Repository paths are `/`-separated and relative to the repository root.
//! A leading `/` is accepted and means the root itself. Paths that would
//! escape the root are rejected before they reach the filesystem.

use thiserror::Error;

/// Path validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Path is empty or names only the root
    #[error("Path must not be empty")]
    Empty,

    /// Path contains a NUL byte
    #[error("Path [{0}] contains a NUL byte")]
    NulByte(String),

    /// Path contains a `..` component
    #[error("Path [{0}] must not contain parent directory references")]
    Traversal(String),

    /// Path uses a Windows drive or backslash separator
    #[error("Path [{0}] must use '/' separators without a drive prefix")]
    ForeignSeparator(String),
}

/// Validate a logical path and return its normalised form
///
/// Normalisation strips the leading `/`, empty components and `.` components.
pub fn validate_path(path: &str) -> Result<String, PathError> {
    if path.contains('\0') {
        return Err(PathError::NulByte(path.replace('\0', "\\0")));
    }
    let bytes = path.as_bytes();
    let drive_prefix = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    if path.contains('\\') || drive_prefix {
        return Err(PathError::ForeignSeparator(path.to_string()));
    }

    let mut parts = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => continue,
            ".." => return Err(PathError::Traversal(path.to_string())),
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return Err(PathError::Empty);
    }
    Ok(parts.join("/"))
}
