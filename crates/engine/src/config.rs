//! Archive engine configuration via `tarsmith.toml`
//!
//! A deployment keeps one config file next to its repositories. On first
//! start a default `tarsmith.toml` can be written; to change settings, edit
//! the file and restart.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tarsmith_codec::DEFAULT_COMPRESSION_LEVEL;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "tarsmith.toml";

/// Smallest accepted copy buffer
pub const MIN_COPY_BUFFER_SIZE: usize = 256;

/// Largest accepted copy buffer (16 MiB)
pub const MAX_COPY_BUFFER_SIZE: usize = 16 * 1024 * 1024;

fn default_copy_buffer_size() -> usize {
    64 * 1024
}

fn default_compression_level() -> u32 {
    DEFAULT_COMPRESSION_LEVEL
}

/// Engine configuration loaded from `tarsmith.toml`.
///
/// # Example
///
/// ```toml
/// # Size of the buffer used to copy entry content (bytes, 256..=16777216)
/// copy_buffer_size = 65536
///
/// # gzip level for rewritten archives (0 = store, 9 = best)
/// compression_level = 6
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Buffer size for entry content copies, in bytes.
    #[serde(default = "default_copy_buffer_size")]
    pub copy_buffer_size: usize,
    /// gzip compression level for rewritten archives.
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            copy_buffer_size: default_copy_buffer_size(),
            compression_level: default_compression_level(),
        }
    }
}

impl ArchiveConfig {
    /// Set the copy buffer size (builder pattern).
    pub fn with_copy_buffer_size(mut self, size: usize) -> Self {
        self.copy_buffer_size = size;
        self
    }

    /// Set the compression level (builder pattern).
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_COPY_BUFFER_SIZE..=MAX_COPY_BUFFER_SIZE).contains(&self.copy_buffer_size) {
            return Err(ConfigError::CopyBufferSize(self.copy_buffer_size));
        }
        if self.compression_level > 9 {
            return Err(ConfigError::CompressionLevel(self.compression_level));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# tarsmith archive engine configuration
#
# Size of the buffer used to copy entry content during a rewrite, in bytes.
# Accepted range: 256 ..= 16777216
copy_buffer_size = 65536

# gzip compression level for rewritten archives (0 = store only, 9 = best).
compression_level = 6
"#
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ArchiveConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file could not be written
    #[error("Failed to write config file '{}': {source}", path.display())]
    Write {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config file '{}': {message}", path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// Copy buffer size out of range
    #[error("copy_buffer_size {0} is outside 256..=16777216")]
    CopyBufferSize(usize),

    /// Compression level out of range
    #[error("compression_level {0} is outside 0..=9")]
    CompressionLevel(u32),
}
