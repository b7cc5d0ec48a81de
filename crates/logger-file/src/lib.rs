//! File-based log sinks with size- and date-based rotation
//!
//! This crate owns the file side of the logger: an immutable, validated
//! rotation config, the template/JSON formatters, and [`FileLogger`], a
//! mutex-serialized writer that appends rendered lines to a managed file,
//! keeps a numbered backup chain when the file crosses its size threshold,
//! and switches to a freshly date-stamped file at each date boundary.
//!
//! Writers degrade instead of crashing: configuration problems surface as
//! [`Error::Configuration`] when the config is built, while I/O trouble is
//! reported to stderr and turns `write` into a `false` return.
//!
//! # Example
//!
//! ```no_run
//! use scribe_logger::fields;
//! use scribe_logger_file::{rotating_logger, FileLoggerConfig};
//!
//! let config = FileLoggerConfig::builder("logs/app.log")
//!     .max_file_size(1024 * 1024)
//!     .backup_count(3)
//!     .build()?;
//!
//! let logger = rotating_logger(config);
//! logger.info("startup", "service listening");
//! logger.warning_with("disk", "space low", fields! { "free_mb" => 512 });
//! # Ok::<(), scribe_logger_file::Error>(())
//! ```

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod formatter;
mod writer;

pub use config::{
    FileLoggerConfig, FileLoggerConfigBuilder, DEFAULT_BACKUP_COUNT, DEFAULT_DATE_FORMAT,
    DEFAULT_MAX_FILE_SIZE, MAX_BACKUP_COUNT,
};
pub use error::{Error, Result};
pub use formatter::{
    format_timestamp, JsonFormatter, PlainTextFormatter, DEFAULT_JSON_TIME_FORMAT,
    DEFAULT_TEMPLATE, DEFAULT_TIME_FORMAT,
};
pub use writer::FileLogger;

use scribe_logger::Logger;
use std::sync::Arc;

/// Build a dispatch [`Logger`] with a rotating file sink and the default
/// text formatter.
///
/// The usual entry point for applications that just want leveled logging
/// to one rotated file. Attach more sinks (another [`FileLogger`], or a
/// [`ConsoleSink`](scribe_logger::ConsoleSink) echo) with
/// [`Logger::add_sink`].
#[must_use]
pub fn rotating_logger(config: FileLoggerConfig) -> Logger {
    let logger = Logger::new(Arc::new(PlainTextFormatter::default()));
    logger.add_sink(Arc::new(FileLogger::new(config)));
    logger
}
