//! Console echo sink

use crate::Sink;
use std::io::{self, Write as _};
use std::sync::{Mutex, PoisonError};

/// Sink that echoes rendered lines to standard output.
///
/// Stdout is held behind a mutex so lines from different threads never
/// interleave mid-line.
pub struct ConsoleSink {
    stdout: Mutex<io::Stdout>,
}

impl ConsoleSink {
    /// Create a console sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(io::stdout()),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, line: &str) -> bool {
        let mut stdout = self.stdout.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(stdout, "{line}").is_ok()
    }

    fn flush(&self) {
        let mut stdout = self.stdout.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = stdout.flush();
    }

    fn close(&self) {
        self.flush();
    }
}
