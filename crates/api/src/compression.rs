//! Compression type selection
//!
//! Callers name the compression of the archive they address. Only gzip is
//! supported; an empty selector defaults to it.

use std::fmt;
use std::str::FromStr;
use tarsmith_core::Error;

/// Supported archive compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionType {
    /// gzip-compressed tar (`.tar.gz`, `.tgz`)
    #[default]
    Gzip,
}

impl CompressionType {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionType::Gzip => "gzip",
        }
    }

    /// Parse a caller-supplied selector
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn parse(selector: &str) -> Result<Self, Error> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "" | "gzip" | "gz" | "tgz" | "tar.gz" => Ok(CompressionType::Gzip),
            _ => Err(Error::not_acceptable(format!(
                "Compression Type [{}] Is Not Supported",
                selector
            ))),
        }
    }
}

impl FromStr for CompressionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompressionType::parse(s)
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
