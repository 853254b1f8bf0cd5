//! tarsmith - inspect and edit gzip-compressed tar archives in file repositories
//!
//! Archives live in named repositories. tarsmith lists the regular files of
//! an archive and removes single entries by rewriting the archive into a
//! staging artifact that replaces the original only once it is complete.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tarsmith::{ArchiveFileManager, LocalFileRepository, RepositoryRegistry};
//!
//! let registry = Arc::new(RepositoryRegistry::new());
//! registry.register_repository(Arc::new(LocalFileRepository::open("Uploads", "/srv/uploads")?));
//!
//! let manager = ArchiveFileManager::new(registry);
//! for record in manager.get_compressed_file_info("Uploads", "site.tar.gz", "gzip")? {
//!     println!("{} {}", record.file_name, record.size);
//! }
//! assert!(manager.remove_entry_from_archive("Uploads", "site.tar.gz", "debug.log", "gzip")?);
//! ```
//!
//! # Architecture
//!
//! Callers go through [`ArchiveFileManager`], which checks preconditions and
//! hands a resolved [`FileRepository`] to the engine. The codec and engine
//! layers are re-exported for callers that already hold a stream.

pub use tarsmith_api::{ArchiveFileManager, CompressionType};
pub use tarsmith_codec::{ArchiveReader, ArchiveWriter};
pub use tarsmith_core::{
    EntryKind, EntryMetadata, EntryRecord, Error, FileRepository, Result, RewriteOutcome,
    StatusCode,
};
pub use tarsmith_engine::{inspect, ArchiveConfig, ArchiveRewriter, ConfigError};
pub use tarsmith_storage::{LocalFileRepository, RepositoryRegistry};
