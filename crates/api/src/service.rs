//! Archive file manager service
//!
//! The two externally visible operations. Each one checks its
//! preconditions in a fixed order before any archive data is touched:
//!
//! 1. path validation
//! 2. repository resolution (missing, unknown, not a file repository)
//! 3. compression type
//! 4. opening the source archive
//!
//! Precondition failures are returned as `Error::Precondition`. Once the
//! source is open, inspection reports decode failures as errors while entry
//! removal reports every internal failure as `Ok(false)`.

use crate::compression::CompressionType;
use std::path::Path;
use std::sync::Arc;
use tarsmith_core::{EntryRecord, Error, FileRepository, RepositoryReader, Result, RewriteOutcome};
use tarsmith_engine::{inspect, ArchiveConfig, ArchiveRewriter, ConfigError};
use tarsmith_storage::{validate_path, RepositoryRegistry};
use tracing::{debug, trace};

/// Entry point for archive inspection and entry removal
pub struct ArchiveFileManager {
    registry: Arc<RepositoryRegistry>,
    rewriter: ArchiveRewriter,
}

impl ArchiveFileManager {
    /// Create a manager with the default configuration
    pub fn new(registry: Arc<RepositoryRegistry>) -> Self {
        Self::with_config(registry, ArchiveConfig::default())
    }

    /// Create a manager with an explicit configuration
    pub fn with_config(registry: Arc<RepositoryRegistry>, config: ArchiveConfig) -> Self {
        ArchiveFileManager {
            registry,
            rewriter: ArchiveRewriter::new(config),
        }
    }

    /// Create a manager configured from a `tarsmith.toml` file
    pub fn from_config_file(
        registry: Arc<RepositoryRegistry>,
        path: &Path,
    ) -> std::result::Result<Self, ConfigError> {
        let config = ArchiveConfig::from_file(path)?;
        Ok(Self::with_config(registry, config))
    }

    /// Registry used to resolve repository identifiers
    pub fn registry(&self) -> &Arc<RepositoryRegistry> {
        &self.registry
    }

    /// Configuration in use
    pub fn config(&self) -> &ArchiveConfig {
        self.rewriter.config()
    }

    /// List the regular files of an archive
    ///
    /// Returns one record per regular file, in archive order.
    ///
    /// # Errors
    ///
    /// Precondition failures, or `Error::Decode` when the archive is not a
    /// valid gzip-compressed tar stream.
    pub fn get_compressed_file_info(
        &self,
        repository_id: &str,
        path: &str,
        compression_type: &str,
    ) -> Result<Vec<EntryRecord>> {
        trace!(repository = %repository_id, path = %path, "Entering get_compressed_file_info");

        let (repo, logical) = self.prepare(repository_id, path, compression_type)?;
        let source = open_source(repo.as_ref(), &logical, path)?;
        let records = inspect(source)?;

        trace!(
            repository = %repository_id,
            path = %path,
            files = records.len(),
            "Exiting get_compressed_file_info"
        );
        Ok(records)
    }

    /// Remove the regular file `entry_name` from an archive
    ///
    /// Returns `Ok(true)` when the rewrite completed. A missing entry is not
    /// an error; the archive is rewritten with identical content.
    ///
    /// # Errors
    ///
    /// Only precondition failures. Decode, framing and replace failures are
    /// logged and reported as `Ok(false)` or, for a failed replace, through
    /// [`ArchiveFileManager::remove_entry_with_outcome`].
    pub fn remove_entry_from_archive(
        &self,
        repository_id: &str,
        archive_path: &str,
        entry_name: &str,
        compression_type: &str,
    ) -> Result<bool> {
        let outcome =
            self.remove_entry_with_outcome(repository_id, archive_path, entry_name, compression_type)?;
        Ok(outcome.completed)
    }

    /// Like [`remove_entry_from_archive`](Self::remove_entry_from_archive),
    /// returning the full outcome
    pub fn remove_entry_with_outcome(
        &self,
        repository_id: &str,
        archive_path: &str,
        entry_name: &str,
        compression_type: &str,
    ) -> Result<RewriteOutcome> {
        trace!(
            repository = %repository_id,
            path = %archive_path,
            entry = %entry_name,
            "Entering remove_entry_from_archive"
        );

        let (repo, logical) = self.prepare(repository_id, archive_path, compression_type)?;
        let source = open_source(repo.as_ref(), &logical, archive_path)?;
        let outcome = self
            .rewriter
            .remove_entry(repo.as_ref(), &logical, source, entry_name)?;

        trace!(
            repository = %repository_id,
            path = %archive_path,
            completed = outcome.completed,
            replaced = outcome.replaced,
            "Exiting remove_entry_from_archive"
        );
        Ok(outcome)
    }

    /// Run the preconditions shared by both operations
    fn prepare(
        &self,
        repository_id: &str,
        path: &str,
        compression_type: &str,
    ) -> Result<(Arc<dyn FileRepository>, String)> {
        let logical = validate_path(path).map_err(|e| Error::not_acceptable(e.to_string()))?;
        let repo = self.registry.resolve(repository_id)?;
        let compression = CompressionType::parse(compression_type)?;
        debug!(
            repository = %repository_id,
            path = %logical,
            compression = %compression,
            "Preconditions satisfied"
        );
        Ok((repo, logical))
    }
}

fn open_source(repo: &dyn FileRepository, logical: &str, path: &str) -> Result<RepositoryReader> {
    repo.open_read(logical).map_err(|e| {
        Error::not_found(format!(
            "Unable To Open [{}] in [{}] : {}",
            path,
            repo.name(),
            e
        ))
    })
}
