//! Codec layer for tarsmith
//!
//! Streams gzip-compressed tar archives in both directions:
//! - ArchiveReader: gzip decode + tar decode, entries yielded lazily
//! - ArchiveWriter: tar encode + gzip encode with explicit entry framing
//! - header: GNU header encoding (long names, base-256 sizes)
//!
//! Both sides are forward-only and never seek.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod header;
pub mod reader;
pub mod writer;

pub use header::{encode_file_header, padding_for, BLOCK_SIZE, NAME_FIELD_LEN};
pub use reader::{ArchiveEntries, ArchiveEntry, ArchiveReader};
pub use writer::{ArchiveWriter, DEFAULT_COMPRESSION_LEVEL};
