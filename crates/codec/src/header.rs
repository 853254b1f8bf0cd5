//! GNU tar header encoding
//!
//! Headers are written in GNU format so that neither long names nor large
//! sizes are a reason to fail:
//! - names longer than the 100-byte field are preceded by a `././@LongLink`
//!   record (type `L`) carrying the full name
//! - sizes at or beyond 8 GiB use the GNU base-256 numeric encoding, which
//!   `tar::Header::set_size` selects automatically
//!
//! Names are copied byte-for-byte from `EntryMetadata::raw_name`, so names
//! that are not valid UTF-8 survive a rewrite. `Header::set_path` would normalise them
//! (dropping `./` prefixes and trailing slashes), which breaks identity
//! between an entry as read and the same entry as rewritten.

use tar::{EntryType, Header};
use tarsmith_core::{EntryMetadata, Error, Result};

/// Tar block size in bytes
pub const BLOCK_SIZE: usize = 512;

/// Width of the classic name field
pub const NAME_FIELD_LEN: usize = 100;

/// Name used by GNU long-name records
const LONG_LINK_NAME: &[u8] = b"././@LongLink";

/// Bytes of zero padding needed after `len` bytes of content
pub fn padding_for(len: u64) -> usize {
    let rem = (len % BLOCK_SIZE as u64) as usize;
    if rem == 0 {
        0
    } else {
        BLOCK_SIZE - rem
    }
}

/// Encode the header block(s) for a regular file entry
///
/// Returns one block for short names, or a long-name record followed by the
/// entry header for names that do not fit the classic field.
pub fn encode_file_header(metadata: &EntryMetadata) -> Result<Vec<u8>> {
    if !metadata.is_regular_file() {
        return Err(Error::framing(format!(
            "only regular files can be written, '{}' is {:?}",
            metadata.name, metadata.kind
        )));
    }
    let name = metadata.raw_name.as_slice();
    if name.is_empty() {
        return Err(Error::framing("entry name must not be empty"));
    }
    if name.contains(&0) {
        return Err(Error::framing(format!(
            "entry name '{}' contains a NUL byte",
            metadata.name.replace('\0', "\\0")
        )));
    }

    let mut out = Vec::with_capacity(BLOCK_SIZE * 2);

    if name.len() > NAME_FIELD_LEN {
        let mut long = Header::new_gnu();
        long.as_old_mut().name[..LONG_LINK_NAME.len()].copy_from_slice(LONG_LINK_NAME);
        long.set_mode(0o644);
        long.set_uid(0);
        long.set_gid(0);
        long.set_mtime(0);
        // Trailing NUL terminator is part of the record
        long.set_size(name.len() as u64 + 1);
        long.set_entry_type(EntryType::GNULongName);
        long.set_cksum();

        out.extend_from_slice(long.as_bytes());
        out.extend_from_slice(name);
        out.push(0);
        out.resize(out.len() + padding_for(name.len() as u64 + 1), 0);
    }

    let mut header = Header::new_gnu();
    let truncated = name.len().min(NAME_FIELD_LEN);
    header.as_old_mut().name[..truncated].copy_from_slice(&name[..truncated]);
    header.set_mode(metadata.mode);
    header.set_uid(0);
    header.set_gid(0);
    header.set_mtime(metadata.mtime);
    header.set_size(metadata.size);
    header.set_entry_type(EntryType::Regular);
    header.set_cksum();
    out.extend_from_slice(header.as_bytes());

    Ok(out)
}
