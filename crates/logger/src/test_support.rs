//! Test support utilities
//!
//! This module provides an in-memory sink for asserting on log output in
//! tests. It's only available when the `test-support` feature is enabled.

use crate::Sink;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A sink that captures rendered lines in memory.
#[derive(Clone, Default)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl CaptureSink {
    /// Create a new capture sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether any captured line contains `text`.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|line| line.contains(text))
    }

    /// Drop all captured lines.
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for CaptureSink {
    fn write(&self, line: &str) -> bool {
        if self.closed.load(Ordering::SeqCst) {
            return false;
        }
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        true
    }

    fn flush(&self) {}

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
