//! Streaming writer for gzip-compressed tar archives
//!
//! Entries are framed explicitly: `begin_entry` writes the header,
//! `write_data` appends content, `end_entry` checks the declared size and
//! pads to the block boundary. `finish` writes the end-of-archive marker and
//! the gzip footer. A mismatch between declared and written sizes is a
//! `Error::Framing`; the writer never emits a header whose size lies.

use crate::header::{encode_file_header, padding_for, BLOCK_SIZE};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Read, Write};
use tarsmith_core::{EntryMetadata, Error, Result};
use tracing::trace;

/// Default gzip compression level
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

const ZERO_BLOCK: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

#[derive(Debug)]
struct OpenEntry {
    name: String,
    declared: u64,
    written: u64,
}

/// Writer producing a gzip-compressed tar stream
pub struct ArchiveWriter<W: Write> {
    encoder: GzEncoder<W>,
    current: Option<OpenEntry>,
    entries_written: usize,
    content_bytes: u64,
}

impl<W: Write> ArchiveWriter<W> {
    /// Wrap a raw byte sink, compressing at `level` (0-9)
    pub fn new(inner: W, level: u32) -> Self {
        ArchiveWriter {
            encoder: GzEncoder::new(inner, Compression::new(level.min(9))),
            current: None,
            entries_written: 0,
            content_bytes: 0,
        }
    }

    /// Wrap a raw byte sink with the default compression level
    pub fn with_default_level(inner: W) -> Self {
        Self::new(inner, DEFAULT_COMPRESSION_LEVEL)
    }

    /// Number of entries closed so far
    pub fn entries_written(&self) -> usize {
        self.entries_written
    }

    /// Content bytes written across all entries
    pub fn content_bytes(&self) -> u64 {
        self.content_bytes
    }

    /// Whether an entry is currently open
    pub fn has_open_entry(&self) -> bool {
        self.current.is_some()
    }

    /// Write the header for a new regular-file entry
    pub fn begin_entry(&mut self, metadata: &EntryMetadata) -> Result<()> {
        if let Some(open) = &self.current {
            return Err(Error::framing(format!(
                "cannot begin '{}' while '{}' is still open",
                metadata.name, open.name
            )));
        }
        let header = encode_file_header(metadata)?;
        self.encoder.write_all(&header)?;
        self.current = Some(OpenEntry {
            name: metadata.name.clone(),
            declared: metadata.size,
            written: 0,
        });
        Ok(())
    }

    /// Append content to the open entry
    pub fn write_data(&mut self, data: &[u8]) -> Result<()> {
        let open = self
            .current
            .as_mut()
            .ok_or_else(|| Error::framing("no entry is open"))?;
        let after = open.written + data.len() as u64;
        if after > open.declared {
            return Err(Error::framing(format!(
                "entry '{}' declared {} bytes, attempted to write {}",
                open.name, open.declared, after
            )));
        }
        self.encoder.write_all(data)?;
        open.written = after;
        self.content_bytes += data.len() as u64;
        Ok(())
    }

    /// Close the open entry, padding it to the block boundary
    pub fn end_entry(&mut self) -> Result<()> {
        let open = self
            .current
            .take()
            .ok_or_else(|| Error::framing("no entry is open"))?;
        if open.written != open.declared {
            return Err(Error::framing(format!(
                "entry '{}' declared {} bytes, got {}",
                open.name, open.declared, open.written
            )));
        }
        let padding = padding_for(open.declared);
        self.encoder.write_all(&ZERO_BLOCK[..padding])?;
        self.entries_written += 1;
        trace!(name = %open.name, size = open.declared, "Closed entry");
        Ok(())
    }

    /// Write one complete entry, copying `content` through `buf`
    ///
    /// Read failures on `content` are reported as `Error::Decode`, since the
    /// content normally comes from another archive.
    pub fn append<R: Read>(
        &mut self,
        metadata: &EntryMetadata,
        content: &mut R,
        buf: &mut [u8],
    ) -> Result<u64> {
        if buf.is_empty() {
            return Err(Error::framing("copy buffer must not be empty"));
        }
        self.begin_entry(metadata)?;
        let mut copied = 0u64;
        loop {
            let n = match content.read(buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(Error::decode(format!(
                        "reading content of '{}': {}",
                        metadata.name, e
                    )))
                }
            };
            self.write_data(&buf[..n])?;
            copied += n as u64;
        }
        self.end_entry()?;
        Ok(copied)
    }

    /// Write the end-of-archive marker, finish compression, and return the sink
    ///
    /// The sink is flushed before it is returned.
    pub fn finish(mut self) -> Result<W> {
        if let Some(open) = self.current.take() {
            return Err(Error::framing(format!(
                "cannot finish archive while '{}' is still open",
                open.name
            )));
        }
        self.encoder.write_all(&ZERO_BLOCK)?;
        self.encoder.write_all(&ZERO_BLOCK)?;
        let mut inner = self.encoder.finish()?;
        inner.flush()?;
        Ok(inner)
    }
}

impl<W: Write> Write for ArchiveWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.write_data(buf) {
            Ok(()) => Ok(buf.len()),
            Err(Error::Io(e)) => Err(e),
            Err(e) => Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string())),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encoder.flush()
    }
}
