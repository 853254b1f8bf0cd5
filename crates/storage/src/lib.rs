//! Repository layer for tarsmith
//!
//! This crate provides the collaborators the archive engine works against:
//! - LocalFileRepository: a `FileRepository` rooted at a directory
//! - validate_path: logical path validation (no traversal, no absolute escapes)
//! - RepositoryRegistry: resolves repository identifiers to capability handles

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod local;
pub mod path;
pub mod registry;

pub use local::LocalFileRepository;
pub use path::{validate_path, PathError};
pub use registry::{RegisteredThing, RepositoryRegistry};
