//! Size- and date-rotating file writer
//!
//! One [`FileLogger`] exclusively owns one physical log file: the resolved
//! current path, the open handle, and the rotation policy. Every write
//! takes the writer's mutex, performs the rotation check, appends one
//! complete line, and flushes. Concurrent callers are therefore totally
//! ordered: no line is ever split across files, and a rotation is never
//! observed interleaved with a write.
//!
//! I/O failures never propagate and never panic: they are reported to
//! stderr and degrade the affected call to `false`. The next write
//! re-attempts whatever failed.

use crate::config::FileLoggerConfig;
use crate::error::Error;
use crate::formatter::format_timestamp;
use chrono::{DateTime, Local};
use scribe_logger::Sink;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A log sink that appends to a managed file, rotating it by size and by
/// calendar date.
#[derive(Debug)]
pub struct FileLogger {
    config: FileLoggerConfig,
    state: Mutex<WriterState>,
}

#[derive(Debug)]
struct WriterState {
    current_path: PathBuf,
    file: Option<File>,
    closed: bool,
}

impl FileLogger {
    /// Create a writer from a validated config.
    ///
    /// The initial open appends to an existing file and creates a missing
    /// one. I/O failure here does not fail construction: it is reported to
    /// stderr and the writer starts degraded, with `write` returning
    /// `false` until a later attempt succeeds.
    #[must_use]
    pub fn new(config: FileLoggerConfig) -> Self {
        let current_path = resolve_path(&config, Local::now());
        if config.auto_create_directory() {
            ensure_parent_dir(&current_path);
        }
        let file = open_log_file(&current_path);

        Self {
            config,
            state: Mutex::new(WriterState {
                current_path,
                file,
                closed: false,
            }),
        }
    }

    /// Convenience constructor using default rotation settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `path` is empty.
    pub fn create(path: impl Into<PathBuf>) -> crate::Result<Self> {
        Ok(Self::new(FileLoggerConfig::new(path)?))
    }

    /// The rotation settings this writer was built with.
    #[must_use]
    pub fn config(&self) -> &FileLoggerConfig {
        &self.config
    }

    /// The resolved path writes currently land in.
    ///
    /// Weakly consistent from the caller's perspective: a concurrent date
    /// boundary may retire the returned path immediately.
    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        self.lock().current_path.clone()
    }

    /// Append one line (a trailing newline is added), rotating first if
    /// the policy calls for it.
    ///
    /// Returns `false` if the line may have been lost: the writer is
    /// closed, the handle could not be opened, or the write failed. The
    /// failure is reported to stderr and the next call re-attempts.
    pub fn write(&self, line: &str) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }

        self.check_rotation(&mut state);

        if state.file.is_none() {
            // Re-attempt an open that failed earlier.
            state.file = open_log_file(&state.current_path);
        }
        let Some(file) = state.file.as_mut() else {
            return false;
        };

        let mut text = String::with_capacity(line.len() + 1);
        text.push_str(line);
        text.push('\n');
        let (encoded, _, _) = self.config.encoding().encode(&text);

        match file.write_all(&encoded).and_then(|()| file.flush()) {
            Ok(()) => true,
            Err(source) => {
                report(&state.current_path, &Error::Io(source));
                // Drop the handle so the next write starts from a clean open.
                state.file = None;
                false
            }
        }
    }

    /// Flush the underlying handle, if one is open.
    pub fn flush(&self) {
        let mut state = self.lock();
        if let Some(file) = state.file.as_mut() {
            if let Err(source) = file.flush() {
                report(&state.current_path, &Error::Io(source));
            }
        }
    }

    /// Flush and release the handle. Idempotent; once closed, `write`
    /// returns `false`.
    pub fn close(&self) {
        let mut state = self.lock();
        if let Some(mut file) = state.file.take() {
            let _ = file.flush();
        }
        state.closed = true;
    }

    fn lock(&self) -> MutexGuard<'_, WriterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rotation check, run under the lock before every write. Date first,
    /// so the size check applies to the post-rotation path.
    fn check_rotation(&self, state: &mut WriterState) {
        if self.config.date_rotation() {
            self.check_date_rotation(state);
        }
        if self.config.max_file_size() > 0 {
            self.check_size_rotation(state);
        }
    }

    /// Adopt a freshly stamped path when the date boundary has been
    /// crossed. No data moves; the old dated file is left as-is.
    fn check_date_rotation(&self, state: &mut WriterState) {
        let expected = resolve_path(&self.config, Local::now());
        if expected == state.current_path {
            return;
        }

        state.file = None;
        state.current_path = expected;
        if self.config.auto_create_directory() {
            ensure_parent_dir(&state.current_path);
        }
        state.file = open_log_file(&state.current_path);
    }

    /// Retire the current file into the numbered backup chain once it has
    /// reached the size threshold, then start a fresh one.
    fn check_size_rotation(&self, state: &mut WriterState) {
        let Ok(metadata) = fs::metadata(&state.current_path) else {
            return;
        };
        if metadata.len() < self.config.max_file_size() {
            return;
        }

        // Close before renaming; some platforms refuse to rename an open file.
        state.file = None;

        if let Err(error) = rotate_backups(&state.current_path, self.config.backup_count()) {
            report(&state.current_path, &error);
        }

        state.file = match File::create(&state.current_path) {
            Ok(file) => Some(file),
            Err(source) => {
                report(&state.current_path, &Error::Io(source));
                None
            }
        };
    }
}

impl Sink for FileLogger {
    fn write(&self, line: &str) -> bool {
        Self::write(self, line)
    }

    fn flush(&self) {
        Self::flush(self);
    }

    fn close(&self) {
        Self::close(self);
    }
}

impl Drop for FileLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Compute the path writes are currently directed to. With date rotation
/// the stamp goes between the file stem and the extension:
/// `logs/app.log` becomes `logs/app_2024-01-01.log`.
fn resolve_path(config: &FileLoggerConfig, now: DateTime<Local>) -> PathBuf {
    if !config.date_rotation() {
        return config.path().to_path_buf();
    }

    let path = config.path();
    let stamp = format_timestamp(now, config.date_format());
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    path.with_file_name(format!("{stem}_{stamp}{extension}"))
}

/// `path` with a numeric backup suffix: `app.log` -> `app.log.3`.
fn numbered(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

/// Shift the numbered backup chain one slot towards the tail and retire
/// the current file to `.1`. The oldest backup falls off the end; with
/// `backup_count == 0` nothing is kept at all (the caller recreates the
/// file empty).
fn rotate_backups(path: &Path, backup_count: usize) -> Result<(), Error> {
    if backup_count == 0 {
        return Ok(());
    }

    for index in (1..backup_count).rev() {
        let from = numbered(path, index);
        if !from.exists() {
            continue;
        }
        let to = numbered(path, index + 1);
        if to.exists() {
            fs::remove_file(&to).map_err(|e| rotation_error(&to, "remove", &e))?;
        }
        fs::rename(&from, &to).map_err(|e| rotation_error(&from, "rename", &e))?;
    }

    let first = numbered(path, 1);
    if first.exists() {
        fs::remove_file(&first).map_err(|e| rotation_error(&first, "remove", &e))?;
    }
    if path.exists() {
        fs::rename(path, &first).map_err(|e| rotation_error(path, "rename", &e))?;
    }

    Ok(())
}

fn rotation_error(path: &Path, action: &str, source: &std::io::Error) -> Error {
    Error::Rotation(format!("{action} {}: {source}", path.display()))
}

/// Open for appending, creating the file if it does not exist. Failure is
/// reported and leaves the writer without a handle.
fn open_log_file(path: &Path) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(source) => {
            report(path, &Error::Io(source));
            None
        }
    }
}

/// Create the parent directory if it is missing. Failure is reported; the
/// subsequent open will fail and degrade the writer.
fn ensure_parent_dir(path: &Path) {
    let Some(parent) = path.parent() else { return };
    if parent.as_os_str().is_empty() || parent.exists() {
        return;
    }
    if let Err(source) = fs::create_dir_all(parent) {
        report(
            path,
            &Error::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            },
        );
    }
}

/// Side-channel reporting. The logger cannot log through itself, so
/// internal failures go to stderr.
fn report(path: &Path, error: &dyn fmt::Display) {
    eprintln!("scribe-logger-file: {}: {error}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date_config(path: &str, pattern: &str) -> FileLoggerConfig {
        FileLoggerConfig::builder(path)
            .date_rotation(true)
            .date_format(pattern)
            .build()
            .unwrap()
    }

    #[test]
    fn plain_path_is_used_verbatim_without_date_rotation() {
        let config = FileLoggerConfig::new("logs/app.log").unwrap();
        let now = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(resolve_path(&config, now), PathBuf::from("logs/app.log"));
    }

    #[test]
    fn date_stamp_goes_between_stem_and_extension() {
        let config = date_config("logs/app.log", "%Y-%m-%d");
        let now = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            resolve_path(&config, now),
            PathBuf::from("logs/app_2024-01-01.log")
        );
    }

    #[test]
    fn date_stamp_without_extension_appends_to_stem() {
        let config = date_config("logs/app", "%Y%m%d");
        let now = Local.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(resolve_path(&config, now), PathBuf::from("logs/app_20241231"));
    }

    #[test]
    fn distinct_stamps_resolve_to_distinct_paths() {
        let config = date_config("app.log", "%Y-%m-%d");
        let before = Local.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
        let after = Local.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_ne!(resolve_path(&config, before), resolve_path(&config, after));
    }

    #[test]
    fn numbered_suffixes_append_to_the_full_name() {
        assert_eq!(
            numbered(Path::new("logs/app.log"), 3),
            PathBuf::from("logs/app.log.3")
        );
    }
}
