//! Public API layer for tarsmith
//!
//! This crate exposes the two archive operations addressed by repository
//! identifier:
//! - `get_compressed_file_info`: list the regular files of an archive
//! - `remove_entry_from_archive`: remove one file, replacing the archive
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tarsmith_api::ArchiveFileManager;
//! use tarsmith_storage::{LocalFileRepository, RepositoryRegistry};
//!
//! let registry = Arc::new(RepositoryRegistry::new());
//! registry.register_repository(Arc::new(LocalFileRepository::open("Uploads", "/srv/uploads")?));
//!
//! let manager = ArchiveFileManager::new(registry);
//! let files = manager.get_compressed_file_info("Uploads", "bundle.tar.gz", "gzip")?;
//! let removed = manager.remove_entry_from_archive("Uploads", "bundle.tar.gz", "notes.txt", "gzip")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compression;
pub mod service;

pub use compression::CompressionType;
pub use service::ArchiveFileManager;
