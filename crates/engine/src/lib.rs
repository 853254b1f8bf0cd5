//! Archive engine for tarsmith
//!
//! This crate runs the two archive operations against a resolved repository:
//! - inspect: list the regular files of a tar.gz stream
//! - ArchiveRewriter: remove one entry by rewriting into a staging artifact
//!   and replacing the original
//! - ArchiveConfig: copy buffer and compression settings (`tarsmith.toml`)
//!
//! The engine knows nothing about repository identifiers or compression
//! type strings; those preconditions are checked by the api layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod inspector;
pub mod rewriter;
pub mod staging;

pub use config::{ArchiveConfig, ConfigError, CONFIG_FILE_NAME};
pub use inspector::inspect;
pub use rewriter::ArchiveRewriter;
pub use staging::{is_staging_name, staging_path_for, STAGING_MARKER};
