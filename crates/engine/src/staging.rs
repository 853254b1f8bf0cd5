//! Staging artifact naming
//!
//! A rewrite stages its output next to the source archive, under
//! `<archivePath>-TempTarGz-<uuid>.tar.gz`. The random v4 token keeps
//! concurrent invocations and pre-existing files from colliding.

use uuid::Uuid;

/// Marker between the archive path and the token
pub const STAGING_MARKER: &str = "-TempTarGz-";

/// Suffix of every staging artifact
pub const STAGING_SUFFIX: &str = ".tar.gz";

/// Derive a fresh staging path for `archive_path`
pub fn staging_path_for(archive_path: &str) -> String {
    staging_path_with_token(archive_path, &Uuid::new_v4())
}

/// Derive the staging path for a given token
pub fn staging_path_with_token(archive_path: &str, token: &Uuid) -> String {
    format!(
        "{}{}{}{}",
        archive_path,
        STAGING_MARKER,
        token.hyphenated(),
        STAGING_SUFFIX
    )
}

/// Whether a file name follows the staging naming scheme
pub fn is_staging_name(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(STAGING_SUFFIX) else {
        return false;
    };
    let Some(idx) = stem.rfind(STAGING_MARKER) else {
        return false;
    };
    Uuid::parse_str(&stem[idx + STAGING_MARKER.len()..]).is_ok()
}
