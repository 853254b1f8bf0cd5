//! A failed rewrite leaves the original archive byte-for-byte intact and
//! never leaves a staging artifact behind.

use crate::common::*;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};
use std::sync::Arc;
use tarsmith::{ArchiveFileManager, Error, FileRepository, LocalFileRepository};
use tarsmith_core::{RepositoryReader, RepositoryWriter};

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn assert_untouched(repo: &TestRepo, path: &str, original: &[u8], entry: &str) {
    assert!(!repo.remove(path, entry));
    assert_eq!(repo.read(path), original);
    assert!(repo.staging_leftovers().is_empty());
}

#[test]
fn valid_gzip_with_invalid_tar_is_left_untouched() {
    let repo = TestRepo::new();
    let corrupt = gzip(&b"this is gzip but not tar framing ".repeat(64));
    repo.put("corrupt.tar.gz", &corrupt);

    assert_untouched(&repo, "corrupt.tar.gz", &corrupt, "anything");
}

#[test]
fn non_gzip_input_is_left_untouched() {
    let repo = TestRepo::new();
    repo.put("plain.tar.gz", b"plain text, no gzip magic");

    assert_untouched(&repo, "plain.tar.gz", b"plain text, no gzip magic", "x");
}

#[test]
fn truncated_archive_is_left_untouched() {
    let repo = TestRepo::new();
    let payload = vec![7u8; 64 * 1024];
    let full = build_archive(&[("big.bin", &payload), ("tail.txt", b"end")]);
    let truncated = full[..full.len() / 2].to_vec();
    repo.put("cut.tar.gz", &truncated);

    assert_untouched(&repo, "cut.tar.gz", &truncated, "tail.txt");
}

#[test]
fn corrupt_gzip_checksum_is_detected() {
    let repo = TestRepo::new();
    let mut bytes = build_archive(&[("A", b"alpha"), ("B", b"beta")]);
    // gzip footer: CRC32 then ISIZE
    let crc_offset = bytes.len() - 8;
    bytes[crc_offset] ^= 0xFF;
    repo.put("crc.tar.gz", &bytes);

    let err = repo
        .manager
        .get_compressed_file_info(REPO_ID, "crc.tar.gz", "")
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "got {:?}", err);

    assert_untouched(&repo, "crc.tar.gz", &bytes, "A");
}

#[test]
fn inspect_decode_failure_is_an_error_not_a_partial_list() {
    let repo = TestRepo::new();
    let mut tar_bytes = {
        let mut builder = tar::Builder::new(Vec::new());
        let mut header = tar::Header::new_gnu();
        header.set_size(2);
        builder.append_data(&mut header, "ok", &b"ok"[..]).unwrap();
        builder.into_inner().unwrap()
    };
    tar_bytes.extend_from_slice(&[0x5A; 512]);
    repo.put("half.tar.gz", &gzip(&tar_bytes));

    let result = repo
        .manager
        .get_compressed_file_info(REPO_ID, "half.tar.gz", "gzip");
    assert!(matches!(result, Err(Error::Decode(_))));
}

/// Local repository whose moves always fail
struct StuckRepository(LocalFileRepository);

impl FileRepository for StuckRepository {
    fn name(&self) -> &str {
        self.0.name()
    }
    fn open_read(&self, path: &str) -> io::Result<RepositoryReader> {
        self.0.open_read(path)
    }
    fn open_write(&self, path: &str) -> io::Result<RepositoryWriter> {
        self.0.open_write(path)
    }
    fn create_empty(&self, path: &str) -> io::Result<()> {
        self.0.create_empty(path)
    }
    fn move_file(&self, _from: &str, _to: &str, _overwrite: bool) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "device busy"))
    }
    fn delete_file(&self, path: &str) -> io::Result<()> {
        self.0.delete_file(path)
    }
    fn exists(&self, path: &str) -> io::Result<bool> {
        self.0.exists(path)
    }
    fn list(&self, dir: &str) -> io::Result<Vec<String>> {
        self.0.list(dir)
    }
}

#[test]
fn replace_failure_keeps_original_and_cleans_staging() {
    let repo = TestRepo::new();
    let original = repo.put_archive("a.tar.gz", &[("A", b"a"), ("B", b"b")]);
    repo.registry.register_repository(Arc::new(StuckRepository(
        LocalFileRepository::open("Stuck", repo.dir.path()).unwrap(),
    )));
    let manager = ArchiveFileManager::new(Arc::clone(&repo.registry));

    let outcome = manager
        .remove_entry_with_outcome("Stuck", "a.tar.gz", "A", "gzip")
        .unwrap();

    assert!(outcome.completed);
    assert!(!outcome.replaced);
    assert_eq!(repo.read("a.tar.gz"), original);
    assert!(repo.staging_leftovers().is_empty());
}
