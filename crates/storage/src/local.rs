//! Directory-backed file repository
//!
//! Logical paths resolve below a root directory. Moves use `fs::rename`,
//! which replaces the destination atomically when both paths live on the
//! same filesystem, which they always do below a single root.

use crate::path::validate_path;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tarsmith_core::{FileRepository, RepositoryReader, RepositoryWriter};
use tracing::{debug, trace};

/// File repository rooted at a local directory
#[derive(Debug, Clone)]
pub struct LocalFileRepository {
    name: String,
    root: PathBuf,
}

impl LocalFileRepository {
    /// Create a repository over an existing directory
    pub fn open(name: impl Into<String>, root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("repository root '{}' is not a directory", root.display()),
            ));
        }
        let name = name.into();
        debug!(repository = %name, root = %root.display(), "Opened local file repository");
        Ok(LocalFileRepository { name, root })
    }

    /// Create the root directory if needed, then open the repository
    pub fn create(name: impl Into<String>, root: impl AsRef<Path>) -> io::Result<Self> {
        fs::create_dir_all(root.as_ref())?;
        Self::open(name, root)
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a logical path to a location below the root
    pub fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let normalised = validate_path(path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
        Ok(self.root.join(normalised))
    }

    fn ensure_parent(target: &Path) -> io::Result<()> {
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl FileRepository for LocalFileRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn open_read(&self, path: &str) -> io::Result<RepositoryReader> {
        let target = self.resolve(path)?;
        trace!(path = %target.display(), "Opening for read");
        let file = File::open(&target)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn open_write(&self, path: &str) -> io::Result<RepositoryWriter> {
        let target = self.resolve(path)?;
        Self::ensure_parent(&target)?;
        trace!(path = %target.display(), "Opening for write");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&target)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn create_empty(&self, path: &str) -> io::Result<()> {
        let target = self.resolve(path)?;
        Self::ensure_parent(&target)?;
        File::create(&target)?;
        Ok(())
    }

    fn move_file(&self, from: &str, to: &str, overwrite: bool) -> io::Result<()> {
        let source = self.resolve(from)?;
        let target = self.resolve(to)?;
        if !overwrite && target.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("'{}' already exists", to),
            ));
        }
        Self::ensure_parent(&target)?;
        fs::rename(&source, &target)?;
        debug!(from = %source.display(), to = %target.display(), "Moved file");
        Ok(())
    }

    fn delete_file(&self, path: &str) -> io::Result<()> {
        let target = self.resolve(path)?;
        fs::remove_file(&target)
    }

    fn exists(&self, path: &str) -> io::Result<bool> {
        let target = self.resolve(path)?;
        Ok(target.is_file())
    }

    fn list(&self, dir: &str) -> io::Result<Vec<String>> {
        let target = if dir.trim_matches('/').is_empty() {
            self.root.clone()
        } else {
            self.resolve(dir)?
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&target)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
