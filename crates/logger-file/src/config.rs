//! Writer configuration and validation

use crate::error::{Error, Result};
use encoding_rs::Encoding;
use std::path::{Path, PathBuf};

/// Default size threshold before a file is rotated: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default number of numbered backups kept by size rotation.
pub const DEFAULT_BACKUP_COUNT: usize = 5;

/// Largest accepted backup count.
pub const MAX_BACKUP_COUNT: usize = 100;

/// Default date-stamp pattern for date rotation.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Immutable rotation settings for one managed log file.
///
/// A config is a validated snapshot: a value of this type always satisfies
/// the invariants (non-empty path, backup count within range, resolvable
/// encoding), and a writer never mutates it. To change settings, build a
/// new config and a new writer.
#[derive(Debug, Clone)]
pub struct FileLoggerConfig {
    path: PathBuf,
    max_file_size: u64,
    backup_count: usize,
    date_rotation: bool,
    date_format: String,
    encoding: &'static Encoding,
    auto_create_directory: bool,
}

impl FileLoggerConfig {
    /// Start building a config for `path`.
    pub fn builder(path: impl Into<PathBuf>) -> FileLoggerConfigBuilder {
        FileLoggerConfigBuilder::new(path)
    }

    /// A config for `path` with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `path` is empty.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// The configured base path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size threshold in bytes; `0` disables size rotation.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Number of numbered backups kept by size rotation. `0` means size
    /// rotation truncates the file without keeping a backup.
    #[must_use]
    pub fn backup_count(&self) -> usize {
        self.backup_count
    }

    /// Whether the current path carries a date stamp that rolls over at
    /// each date boundary.
    #[must_use]
    pub fn date_rotation(&self) -> bool {
        self.date_rotation
    }

    /// Pattern used to compute the date stamp.
    #[must_use]
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Output text encoding.
    #[must_use]
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Whether missing parent directories are created on demand.
    #[must_use]
    pub fn auto_create_directory(&self) -> bool {
        self.auto_create_directory
    }
}

/// Builder for [`FileLoggerConfig`]; `build` validates.
#[derive(Debug, Clone)]
pub struct FileLoggerConfigBuilder {
    path: PathBuf,
    max_file_size: u64,
    backup_count: usize,
    date_rotation: bool,
    date_format: String,
    encoding: String,
    auto_create_directory: bool,
}

impl FileLoggerConfigBuilder {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            backup_count: DEFAULT_BACKUP_COUNT,
            date_rotation: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            encoding: "utf-8".to_string(),
            auto_create_directory: true,
        }
    }

    /// Size threshold in bytes before rotation; `0` disables size rotation.
    #[must_use]
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Number of numbered backups to keep (at most [`MAX_BACKUP_COUNT`]).
    #[must_use]
    pub fn backup_count(mut self, count: usize) -> Self {
        self.backup_count = count;
        self
    }

    /// Enable or disable date-stamped file names.
    #[must_use]
    pub fn date_rotation(mut self, enabled: bool) -> Self {
        self.date_rotation = enabled;
        self
    }

    /// Pattern for the date stamp (strftime syntax).
    #[must_use]
    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    /// Output encoding label, resolved via the WHATWG label registry
    /// (e.g. `"utf-8"`, `"windows-1252"`).
    #[must_use]
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Create missing parent directories when opening files.
    #[must_use]
    pub fn auto_create_directory(mut self, enabled: bool) -> Self {
        self.auto_create_directory = enabled;
        self
    }

    /// Validate and produce the immutable config snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty path, a backup count
    /// above [`MAX_BACKUP_COUNT`], an empty date pattern while date
    /// rotation is enabled, or an unknown encoding label.
    pub fn build(self) -> Result<FileLoggerConfig> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::Configuration(
                "log file path cannot be empty".to_string(),
            ));
        }

        if self.backup_count > MAX_BACKUP_COUNT {
            return Err(Error::Configuration(format!(
                "backup count {} exceeds the maximum of {MAX_BACKUP_COUNT}",
                self.backup_count
            )));
        }

        if self.date_rotation && self.date_format.is_empty() {
            return Err(Error::Configuration(
                "date format cannot be empty when date rotation is enabled".to_string(),
            ));
        }

        let encoding = Encoding::for_label(self.encoding.as_bytes()).ok_or_else(|| {
            Error::Configuration(format!("unknown encoding label: {}", self.encoding))
        })?;

        Ok(FileLoggerConfig {
            path: self.path,
            max_file_size: self.max_file_size,
            backup_count: self.backup_count,
            date_rotation: self.date_rotation,
            date_format: self.date_format,
            encoding,
            auto_create_directory: self.auto_create_directory,
        })
    }
}
