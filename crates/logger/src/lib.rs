//! Core logging surface: severity levels, structured records, and the
//! level-filtering dispatch that fans rendered lines out to one or more
//! sinks.
//!
//! This crate deliberately knows nothing about files or rotation. Sinks
//! implement [`Sink`] (the file-backed one lives in `scribe-logger-file`),
//! formatters implement [`Render`], and [`Logger`] wires the two together:
//!
//! ```text
//! caller -> Record -> Render::render -> Sink::write (each attached sink)
//! ```
//!
//! The minimum level is held as an atomically swappable snapshot, so level
//! changes never race with in-flight dispatch.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod level;
mod logger;
mod macros;
mod record;
mod stdout;

#[cfg(feature = "test-support")]
mod test_support;

pub use level::{Level, ParseLevelError};
pub use logger::{Logger, Render, Sink};
pub use record::{Fields, Record};
pub use stdout::ConsoleSink;

#[cfg(feature = "test-support")]
pub use test_support::CaptureSink;

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}
