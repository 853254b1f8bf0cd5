//! Repository capability trait
//!
//! A `FileRepository` is a named storage location that resolves logical
//! paths to byte streams. The archive engine never asks what kind of thing
//! it was handed; it receives this capability, resolved once up front.

use std::io::{self, Read, Write};

/// Readable byte stream opened from a repository
pub type RepositoryReader = Box<dyn Read + Send>;

/// Writable byte stream opened from a repository
///
/// Dropping the stream releases it; callers flush explicitly to observe errors.
pub type RepositoryWriter = Box<dyn Write + Send>;

/// Managed file repository
///
/// Paths are logical, `/`-separated and relative to the repository root.
/// Implementations are expected to validate paths themselves.
///
/// Thread safety: repositories are shared between callers (`Send + Sync`),
/// but the repository alone arbitrates per-path consistency.
pub trait FileRepository: Send + Sync {
    /// Repository identifier
    fn name(&self) -> &str;

    /// Open a file for reading
    fn open_read(&self, path: &str) -> io::Result<RepositoryReader>;

    /// Open a file for writing, truncating existing content
    fn open_write(&self, path: &str) -> io::Result<RepositoryWriter>;

    /// Create an empty file, replacing any existing file at `path`
    fn create_empty(&self, path: &str) -> io::Result<()>;

    /// Move `from` to `to`
    ///
    /// With `overwrite` set, an existing `to` is replaced in a single step:
    /// observers of `to` see either the old or the new content, never a mix.
    fn move_file(&self, from: &str, to: &str, overwrite: bool) -> io::Result<()>;

    /// Delete a file
    fn delete_file(&self, path: &str) -> io::Result<()>;

    /// Whether a file exists at `path`
    fn exists(&self, path: &str) -> io::Result<bool>;

    /// Names of the files directly inside directory `dir` (`""` for the root)
    fn list(&self, dir: &str) -> io::Result<Vec<String>>;
}
