//! Archive inspection
//!
//! Projects every regular file of a gzip-compressed tar stream into an
//! `EntryRecord`, in archive order. Directories, links and device entries
//! are not reported.

use std::io::Read;
use tarsmith_codec::ArchiveReader;
use tarsmith_core::{EntryRecord, Result};
use tracing::debug;

/// List the regular files of an archive
///
/// On a decode failure the records collected so far are discarded and the
/// error is returned. The source stream is released on every path.
pub fn inspect<R: Read>(source: R) -> Result<Vec<EntryRecord>> {
    let mut reader = ArchiveReader::new(source);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for entry in reader.entries()? {
        let entry = entry?;
        let metadata = entry.metadata();
        if metadata.is_regular_file() {
            records.push(EntryRecord::from(metadata));
        } else {
            skipped += 1;
        }
    }
    reader.finish()?;

    debug!(files = records.len(), skipped, "Inspected archive");
    Ok(records)
}
