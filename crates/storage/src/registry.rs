//! Named registry of repositories and other things
//!
//! Callers address repositories by identifier. The registry may also hold
//! things that are not file repositories; resolving one of those as a
//! repository is a precondition failure, not a type check inside the engine.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let registry = RepositoryRegistry::new();
//! registry.register_repository(Arc::new(LocalFileRepository::open("Uploads", dir)?));
//! registry.register_other("Dashboard", "Mashup");
//!
//! let repo = registry.resolve("Uploads")?;
//! ```

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tarsmith_core::{Error, FileRepository, Result};

/// An entry in the registry
#[derive(Clone)]
pub enum RegisteredThing {
    /// A file repository capability
    FileRepository(Arc<dyn FileRepository>),
    /// Some other kind of thing, identified by its kind name
    Other {
        /// Kind name (for diagnostics)
        kind: String,
    },
}

impl std::fmt::Debug for RegisteredThing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisteredThing::FileRepository(repo) => {
                f.debug_tuple("FileRepository").field(&repo.name()).finish()
            }
            RegisteredThing::Other { kind } => f.debug_struct("Other").field("kind", kind).finish(),
        }
    }
}

/// Registry of named things
///
/// Shared between callers; lookups take a read lock only.
#[derive(Default)]
pub struct RepositoryRegistry {
    things: RwLock<HashMap<String, RegisteredThing>>,
}

impl RepositoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file repository under its own name
    ///
    /// Replaces any thing previously registered under that name.
    pub fn register_repository(&self, repository: Arc<dyn FileRepository>) {
        let name = repository.name().to_string();
        self.things
            .write()
            .insert(name, RegisteredThing::FileRepository(repository));
    }

    /// Register a thing that is not a file repository
    pub fn register_other(&self, name: impl Into<String>, kind: impl Into<String>) {
        self.things
            .write()
            .insert(name.into(), RegisteredThing::Other { kind: kind.into() });
    }

    /// Remove a thing, returning it if present
    pub fn unregister(&self, name: &str) -> Option<RegisteredThing> {
        self.things.write().remove(name)
    }

    /// Look up a thing by name
    pub fn get(&self, name: &str) -> Option<RegisteredThing> {
        self.things.read().get(name).cloned()
    }

    /// Number of registered things
    pub fn len(&self) -> usize {
        self.things.read().len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.things.read().is_empty()
    }

    /// Resolve an identifier to a file repository capability
    ///
    /// # Errors
    ///
    /// - empty identifier: not acceptable
    /// - unknown identifier: not found
    /// - registered thing is not a file repository: not found
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn FileRepository>> {
        if name.is_empty() {
            return Err(Error::not_acceptable("File Repository Must Be Specified"));
        }
        match self.get(name) {
            None => Err(Error::not_found(format!(
                "File Repository [{}] Does Not Exist",
                name
            ))),
            Some(RegisteredThing::Other { .. }) => Err(Error::not_found(format!(
                "Thing [{}] Is Not A File Repository",
                name
            ))),
            Some(RegisteredThing::FileRepository(repo)) => Ok(repo),
        }
    }
}
