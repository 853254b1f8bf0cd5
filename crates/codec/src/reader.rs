//! Streaming reader for gzip-compressed tar archives
//!
//! The reader decodes forward-only: gzip on the raw stream, tar framing on
//! top. Entries are yielded lazily; each `ArchiveEntry` borrows the reader
//! and exposes the entry content through `Read` until the next entry is
//! requested.

use flate2::read::GzDecoder;
use std::io::{self, Read};
use tar::{Archive, Entries, Entry, EntryType};
use tarsmith_core::{EntryKind, EntryMetadata, Error, Result};
use tracing::trace;

/// Reader over a gzip-compressed tar stream
pub struct ArchiveReader<R: Read> {
    archive: Archive<GzDecoder<R>>,
}

impl<R: Read> ArchiveReader<R> {
    /// Wrap a raw byte stream
    pub fn new(inner: R) -> Self {
        ArchiveReader {
            archive: Archive::new(GzDecoder::new(inner)),
        }
    }

    /// Iterate over the entries of the archive
    ///
    /// Must be called at most once per reader.
    pub fn entries(&mut self) -> Result<ArchiveEntries<'_, R>> {
        let inner = self
            .archive
            .entries()
            .map_err(|e| Error::decode(format!("tar stream: {}", e)))?;
        Ok(ArchiveEntries {
            inner,
            index: 0,
            done: false,
        })
    }

    /// Consume the rest of the compressed stream and release the reader
    ///
    /// Draining past the tar end-of-archive marker makes the gzip layer
    /// reach its footer, so a corrupt or truncated trailer surfaces as
    /// `Error::Decode` instead of going unnoticed.
    pub fn finish(self) -> Result<R> {
        let mut decoder = self.archive.into_inner();
        let trailing = io::copy(&mut decoder, &mut io::sink())
            .map_err(|e| Error::decode(format!("gzip trailer: {}", e)))?;
        trace!(trailing, "Drained archive trailer");
        Ok(decoder.into_inner())
    }
}

/// Lazy sequence of archive entries
///
/// Yields `Err(Error::Decode)` once on malformed input, then ends.
pub struct ArchiveEntries<'a, R: Read + 'a> {
    inner: Entries<'a, GzDecoder<R>>,
    index: usize,
    done: bool,
}

impl<'a, R: Read> Iterator for ArchiveEntries<'a, R> {
    type Item = Result<ArchiveEntry<'a, R>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = match self.inner.next() {
            None => {
                self.done = true;
                return None;
            }
            Some(Err(e)) => Err(Error::decode(format!("entry #{}: {}", self.index, e))),
            Some(Ok(mut entry)) => {
                metadata_of(&mut entry).map(|metadata| ArchiveEntry { metadata, inner: entry })
            }
        };

        match &item {
            Ok(entry) => {
                trace!(
                    index = self.index,
                    name = %entry.metadata.name,
                    size = entry.metadata.size,
                    "Decoded entry"
                );
                self.index += 1;
            }
            Err(_) => self.done = true,
        }
        Some(item)
    }
}

/// One entry of an archive: metadata plus its content stream
pub struct ArchiveEntry<'a, R: Read + 'a> {
    metadata: EntryMetadata,
    inner: Entry<'a, GzDecoder<R>>,
}

impl<'a, R: Read> ArchiveEntry<'a, R> {
    /// Entry metadata
    pub fn metadata(&self) -> &EntryMetadata {
        &self.metadata
    }

    /// Take the metadata, dropping the content stream
    pub fn into_metadata(self) -> EntryMetadata {
        self.metadata
    }
}

impl<'a, R: Read> Read for ArchiveEntry<'a, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

fn kind_of(entry_type: EntryType) -> EntryKind {
    if entry_type.is_file() {
        EntryKind::Regular
    } else if entry_type.is_dir() {
        EntryKind::Directory
    } else if entry_type.is_symlink() {
        EntryKind::Symlink
    } else if entry_type.is_hard_link() {
        EntryKind::HardLink
    } else {
        EntryKind::Other(entry_type.as_byte())
    }
}

fn metadata_of<R: Read>(entry: &mut Entry<'_, R>) -> Result<EntryMetadata> {
    let raw_name = entry.path_bytes().into_owned();
    let name = String::from_utf8_lossy(&raw_name).into_owned();

    // PAX `size` overrides the header field for entries beyond the octal limit
    let mut pax_size = None;
    if let Some(extensions) = entry
        .pax_extensions()
        .map_err(|e| Error::decode(format!("pax extensions of '{}': {}", name, e)))?
    {
        for extension in extensions {
            let extension = extension
                .map_err(|e| Error::decode(format!("pax extension of '{}': {}", name, e)))?;
            if extension.key() == Ok("size") {
                let value = extension
                    .value()
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .ok_or_else(|| {
                        Error::decode(format!(
                            "pax size of '{}': {:?}",
                            name,
                            String::from_utf8_lossy(extension.value_bytes())
                        ))
                    })?;
                pax_size = Some(value);
            }
        }
    }

    let header = entry.header();
    let size = match pax_size {
        Some(size) => size,
        None => header
            .entry_size()
            .map_err(|e| Error::decode(format!("size of '{}': {}", name, e)))?,
    };

    Ok(EntryMetadata {
        kind: kind_of(header.entry_type()),
        mode: header.mode().unwrap_or(0o644),
        mtime: header.mtime().unwrap_or(0),
        name,
        raw_name,
        size,
    })
}
