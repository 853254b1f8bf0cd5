//! Archive entry and rewrite result types

use serde::{Deserialize, Serialize};

/// Kind of a tar entry, derived from its type flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Ordinary file content
    Regular,
    /// Directory
    Directory,
    /// Symbolic link
    Symlink,
    /// Hard link
    HardLink,
    /// Anything else (devices, fifos, contiguous files, ...), with the raw type flag
    Other(u8),
}

/// Metadata for one entry of a tar stream
///
/// Produced one at a time by the archive reader. The content itself is only
/// reachable through the reader's entry handle while it is current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    /// Entry name for display, long-name extensions resolved
    ///
    /// Lossy when the stored name is not UTF-8; `raw_name` is authoritative.
    pub name: String,
    /// Entry name bytes exactly as stored
    pub raw_name: Vec<u8>,
    /// Content size in bytes
    pub size: u64,
    /// Entry kind
    pub kind: EntryKind,
    /// Permission bits
    pub mode: u32,
    /// Modification time (seconds since the epoch)
    pub mtime: u64,
}

impl EntryMetadata {
    /// Metadata for a regular file with default mode and a zero mtime
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        EntryMetadata {
            raw_name: name.clone().into_bytes(),
            name,
            size,
            kind: EntryKind::Regular,
            mode: 0o644,
            mtime: 0,
        }
    }

    /// Metadata for a directory entry
    pub fn directory(name: impl Into<String>) -> Self {
        let name = name.into();
        EntryMetadata {
            raw_name: name.clone().into_bytes(),
            name,
            size: 0,
            kind: EntryKind::Directory,
            mode: 0o755,
            mtime: 0,
        }
    }

    /// Replace the name with raw stored bytes
    ///
    /// `name` becomes the lossy UTF-8 rendering of `raw`.
    pub fn with_raw_name(mut self, raw: impl Into<Vec<u8>>) -> Self {
        self.raw_name = raw.into();
        self.name = String::from_utf8_lossy(&self.raw_name).into_owned();
        self
    }

    /// Whether the stored name is exactly `name`
    pub fn name_matches(&self, name: &str) -> bool {
        self.raw_name == name.as_bytes()
    }

    /// Set the permission bits
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    /// Set the modification time
    pub fn with_mtime(mut self, mtime: u64) -> Self {
        self.mtime = mtime;
        self
    }

    /// Whether this entry holds ordinary file content
    ///
    /// A regular type flag on a name ending in `/` is an old-style directory.
    pub fn is_regular_file(&self) -> bool {
        self.kind == EntryKind::Regular && !self.raw_name.ends_with(b"/")
    }
}

/// Inspection record: one regular file of an archive
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Entry name
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Content size in bytes
    pub size: u64,
}

impl EntryRecord {
    /// Create a record
    pub fn new(file_name: impl Into<String>, size: u64) -> Self {
        EntryRecord {
            file_name: file_name.into(),
            size,
        }
    }
}

impl From<&EntryMetadata> for EntryRecord {
    fn from(metadata: &EntryMetadata) -> Self {
        EntryRecord::new(metadata.name.clone(), metadata.size)
    }
}

/// Lifecycle phases of a single entry removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewritePhase {
    /// Nothing in flight
    Idle,
    /// Staging placeholder exists
    StagingCreated,
    /// Entries are being copied into the staging archive
    Copying,
    /// Copy loop aborted
    CopyFailed,
    /// Copy loop and archive finalisation succeeded
    CopyComplete,
    /// Staging archive is being moved over the original
    Replacing,
    /// The move failed
    ReplaceFailed,
    /// The move succeeded
    ReplaceOk,
    /// Staging artifact is being removed
    Cleanup,
}

impl RewritePhase {
    /// Whether `next` is a legal successor of this phase
    pub fn can_transition_to(&self, next: RewritePhase) -> bool {
        use RewritePhase::*;
        matches!(
            (self, next),
            (Idle, StagingCreated)
                | (StagingCreated, Copying)
                | (StagingCreated, Cleanup)
                | (Copying, CopyFailed)
                | (Copying, CopyComplete)
                | (CopyFailed, Cleanup)
                | (CopyComplete, Replacing)
                | (Replacing, ReplaceFailed)
                | (Replacing, ReplaceOk)
                | (ReplaceFailed, Cleanup)
                | (ReplaceOk, Idle)
                | (Cleanup, Idle)
        )
    }
}

/// Result of an entry removal
#[must_use = "the completion flag reports whether the rewrite succeeded"]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Copy loop and staging archive finalisation succeeded
    pub completed: bool,
    /// The staging archive was moved over the original
    pub replaced: bool,
    /// Regular files copied into the new archive
    pub entries_copied: usize,
    /// Entries not copied (the removal target and every non-regular entry)
    pub entries_skipped: usize,
    /// Content bytes copied
    pub bytes_copied: u64,
    /// Staging path used for this invocation
    pub staging_path: String,
}
