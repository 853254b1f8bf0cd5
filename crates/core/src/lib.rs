//! Core types and traits for tarsmith
//!
//! This crate defines the foundational types shared by every layer:
//! - EntryMetadata / EntryKind: one entry as decoded from a tar stream
//! - EntryRecord: the (name, size) projection returned by inspection
//! - RewriteOutcome / RewritePhase: result and lifecycle of an entry removal
//! - Error: the error taxonomy (precondition, decode, framing, replace, I/O)
//! - FileRepository: capability handle for a managed file repository

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result, StatusCode};
pub use traits::{FileRepository, RepositoryReader, RepositoryWriter};
pub use types::{EntryKind, EntryMetadata, EntryRecord, RewriteOutcome, RewritePhase};
