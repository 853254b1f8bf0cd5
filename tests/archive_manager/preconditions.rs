//! Precondition failures are raised before any archive data is touched.

use crate::common::*;
use tarsmith::{Error, StatusCode};

fn status(result: tarsmith::Result<impl std::fmt::Debug>) -> (StatusCode, String) {
    match result {
        Err(Error::Precondition { status, message }) => (status, message),
        other => panic!("expected a precondition failure, got {:?}", other),
    }
}

#[test]
fn missing_repository_id() {
    let repo = TestRepo::new();
    repo.put_archive("a.tar.gz", &[("A", b"a")]);

    let (code, message) = status(repo.manager.get_compressed_file_info("", "a.tar.gz", ""));
    assert_eq!(code, StatusCode::NotAcceptable);
    assert_eq!(code.http_code(), 406);
    assert_eq!(message, "File Repository Must Be Specified");
}

#[test]
fn unknown_repository_id() {
    let repo = TestRepo::new();
    let (code, message) =
        status(repo.manager.remove_entry_from_archive("Elsewhere", "a.tar.gz", "A", ""));
    assert_eq!(code, StatusCode::NotFound);
    assert_eq!(code.http_code(), 404);
    assert_eq!(message, "File Repository [Elsewhere] Does Not Exist");
}

#[test]
fn thing_that_is_not_a_repository() {
    let repo = TestRepo::new();
    let (code, message) = status(repo.manager.get_compressed_file_info(OTHER_ID, "a.tar.gz", ""));
    assert_eq!(code, StatusCode::NotFound);
    assert_eq!(message, format!("Thing [{}] Is Not A File Repository", OTHER_ID));
}

#[test]
fn missing_archive() {
    let repo = TestRepo::new();
    let (code, message) =
        status(repo.manager.remove_entry_from_archive(REPO_ID, "absent.tar.gz", "A", ""));
    assert_eq!(code, StatusCode::NotFound);
    assert!(
        message.starts_with(&format!("Unable To Open [absent.tar.gz] in [{}] : ", REPO_ID)),
        "{}",
        message
    );
    assert!(repo.staging_leftovers().is_empty());
}

#[test]
fn invalid_paths_are_not_acceptable() {
    let repo = TestRepo::new();
    repo.put_archive("a.tar.gz", &[("A", b"a")]);

    for path in ["", "/", "../a.tar.gz", "x/../../a.tar.gz", "a\0.tar.gz", "C:\\a.tar.gz"] {
        let (code, _) = status(repo.manager.get_compressed_file_info(REPO_ID, path, ""));
        assert_eq!(code, StatusCode::NotAcceptable, "path {:?}", path);
    }
}

#[test]
fn unsupported_compression_type() {
    let repo = TestRepo::new();
    let original = repo.put_archive("a.tar.gz", &[("A", b"a")]);

    let (code, message) =
        status(repo.manager.remove_entry_from_archive(REPO_ID, "a.tar.gz", "A", "bzip2"));
    assert_eq!(code, StatusCode::NotAcceptable);
    assert!(message.contains("bzip2"));
    assert_eq!(repo.read("a.tar.gz"), original);
}

#[test]
fn repository_is_checked_before_compression_and_source() {
    let repo = TestRepo::new();
    // Unknown repository, unsupported compression and missing file at once
    let (code, message) =
        status(repo.manager.get_compressed_file_info("Elsewhere", "absent", "rar"));
    assert_eq!(code, StatusCode::NotFound);
    assert!(message.contains("Does Not Exist"));

    // Unsupported compression and missing file
    let (code, _) = status(repo.manager.get_compressed_file_info(REPO_ID, "absent", "rar"));
    assert_eq!(code, StatusCode::NotAcceptable);
}
