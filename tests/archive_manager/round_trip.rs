//! A rewrite that removes nothing reproduces every regular file exactly.

use crate::common::*;
use proptest::prelude::*;
use std::collections::BTreeMap;
use tarsmith::EntryRecord;

#[test]
fn no_match_rewrite_preserves_names_sizes_and_content() {
    let repo = TestRepo::new();
    let original = repo.put_archive(
        "site.tar.gz",
        &[
            ("index.html", b"<html></html>"),
            ("assets/app.js", b"console.log(1);"),
            ("empty", b""),
        ],
    );

    assert!(repo.remove("site.tar.gz", "not-in-archive"));

    let before = read_entries(&original);
    let after = read_entries(&repo.read("site.tar.gz"));
    assert_eq!(before.len(), after.len());
    for ((meta_a, data_a), (meta_b, data_b)) in before.iter().zip(after.iter()) {
        assert_eq!(meta_a.name, meta_b.name);
        assert_eq!(meta_a.size, meta_b.size);
        assert_eq!(data_a, data_b);
    }
}

#[test]
fn rewrite_preserves_mode_and_mtime() {
    let repo = TestRepo::new();
    let mut builder = tar::Builder::new(flate2::write::GzEncoder::new(
        Vec::new(),
        flate2::Compression::default(),
    ));
    let mut header = tar::Header::new_gnu();
    header.set_size(3);
    header.set_mode(0o755);
    header.set_mtime(1_700_000_000);
    builder
        .append_data(&mut header, "bin/run.sh", &b"#!x"[..])
        .unwrap();
    repo.put("tools.tar.gz", &builder.into_inner().unwrap().finish().unwrap());

    assert!(repo.remove("tools.tar.gz", "other"));

    let entries = read_entries(&repo.read("tools.tar.gz"));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0.mode & 0o7777, 0o755);
    assert_eq!(entries[0].0.mtime, 1_700_000_000);
    assert_eq!(entries[0].1, b"#!x");
}

/// Archive with a latin-1 encoded `café.txt` next to a plain `other`
fn latin1_archive() -> Vec<u8> {
    let mut builder = tar::Builder::new(flate2::write::GzEncoder::new(
        Vec::new(),
        flate2::Compression::default(),
    ));
    let mut header = tar::Header::new_gnu();
    header.as_old_mut().name[..8].copy_from_slice(b"caf\xe9.txt");
    header.set_size(5);
    header.set_mode(0o644);
    header.set_cksum();
    builder.append(&header, &b"menu!"[..]).unwrap();
    let mut header = tar::Header::new_gnu();
    header.set_size(1);
    builder.append_data(&mut header, "other", &b"o"[..]).unwrap();
    builder.into_inner().unwrap().finish().unwrap()
}

#[test]
fn non_utf8_names_survive_a_rewrite() {
    let repo = TestRepo::new();
    repo.put("n.tar.gz", &latin1_archive());

    assert!(repo.remove("n.tar.gz", "other"));

    let bytes = repo.read("n.tar.gz");
    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(&bytes[..]));
    let stored: Vec<Vec<u8>> = archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path_bytes().into_owned())
        .collect();
    assert_eq!(stored, vec![b"caf\xe9.txt".to_vec()]);

    let entries = read_entries(&bytes);
    assert_eq!(entries[0].0.raw_name, b"caf\xe9.txt");
    assert_eq!(entries[0].1, b"menu!");
}

#[test]
fn lossy_name_does_not_match_a_non_utf8_entry() {
    let repo = TestRepo::new();
    repo.put("n.tar.gz", &latin1_archive());

    // Inspection shows the replacement character, but the stored name differs
    assert_eq!(names(&repo.inspect("n.tar.gz")), vec!["caf\u{FFFD}.txt", "other"]);
    assert!(repo.remove("n.tar.gz", "caf\u{FFFD}.txt"));

    let entries = read_entries(&repo.read("n.tar.gz"));
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0.raw_name, b"caf\xe9.txt");
}

#[test]
fn inspect_reports_every_regular_file_in_order() {
    let repo = TestRepo::new();
    repo.put_archive("a.tar.gz", &[("z", b"1"), ("a", b"22"), ("m", b"333")]);

    assert_eq!(
        repo.inspect("a.tar.gz"),
        vec![
            EntryRecord::new("z", 1),
            EntryRecord::new("a", 2),
            EntryRecord::new("m", 3),
        ]
    );
}

fn entry_set() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    proptest::collection::btree_map(
        "[a-z]{1,12}(/[a-z0-9_.-]{1,12}){0,2}",
        proptest::collection::vec(any::<u8>(), 0..2048),
        0..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Rewriting without a match yields the same entries with the same bytes.
    #[test]
    fn rewrite_round_trip(files in entry_set()) {
        let repo = TestRepo::new();
        let listed: Vec<(&str, &[u8])> = files
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
            .collect();
        repo.put_archive("prop.tar.gz", &listed);

        prop_assert!(repo.remove("prop.tar.gz", "#never-a-name#"));

        let after = read_entries(&repo.read("prop.tar.gz"));
        prop_assert_eq!(after.len(), files.len());
        for ((meta, data), (name, expected)) in after.iter().zip(files.iter()) {
            prop_assert_eq!(&meta.name, name);
            prop_assert_eq!(meta.size, expected.len() as u64);
            prop_assert_eq!(data, expected);
        }
        prop_assert!(repo.staging_leftovers().is_empty());
    }
}
