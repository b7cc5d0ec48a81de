//! Render and sink traits plus the dispatch logger

use crate::{Fields, Level, Record};
use arc_swap::ArcSwap;
use std::sync::{Arc, PoisonError, RwLock};

/// Renders a record into one output line.
///
/// Implementations must be deterministic: rendering the same record twice
/// yields the same string. Rendering never fails; unknown template fields
/// are handled by policy, not by error.
pub trait Render: Send + Sync {
    /// Produce the final line for `record`, without a trailing newline.
    fn render(&self, record: &Record) -> String;
}

/// A destination for rendered log lines.
///
/// `write` returning `false` means the line may have been lost; callers
/// treat that as degraded output, never as a reason to abort.
pub trait Sink: Send + Sync {
    /// Append one rendered line.
    fn write(&self, line: &str) -> bool;

    /// Flush any buffered output.
    fn flush(&self);

    /// Release resources. Must be idempotent; writes after close fail.
    fn close(&self);
}

/// Level-filtering dispatch over a set of sinks.
///
/// Each accepted event is rendered exactly once and the resulting line is
/// handed to every attached sink. The minimum level is an atomically
/// swappable snapshot: changing it never blocks or races with in-flight
/// dispatch. Changing the renderer affects subsequent events only.
pub struct Logger {
    renderer: RwLock<Arc<dyn Render>>,
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
    min_level: ArcSwap<Level>,
}

impl Logger {
    /// Create a dispatcher with no sinks attached.
    pub fn new(renderer: Arc<dyn Render>) -> Self {
        Self {
            renderer: RwLock::new(renderer),
            sinks: RwLock::new(Vec::new()),
            min_level: ArcSwap::from_pointee(Level::Debug),
        }
    }

    /// Attach another independently configured sink.
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.sinks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sink);
    }

    /// Replace the renderer for subsequent events.
    pub fn set_renderer(&self, renderer: Arc<dyn Render>) {
        *self
            .renderer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = renderer;
    }

    /// Current minimum severity.
    #[must_use]
    pub fn min_level(&self) -> Level {
        **self.min_level.load()
    }

    /// Swap in a new minimum severity.
    pub fn set_min_level(&self, level: Level) {
        self.min_level.store(Arc::new(level));
    }

    /// Dispatch one event.
    ///
    /// Returns `false` if the event was filtered out or any sink failed to
    /// accept the rendered line.
    pub fn log(
        &self,
        level: Level,
        module: &str,
        message: impl Into<String>,
        fields: Fields,
    ) -> bool {
        if level < self.min_level() {
            return false;
        }

        let record = Record::new(level, module, message).with_fields(fields);
        let line = self
            .renderer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .render(&record);

        let sinks = self
            .sinks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut accepted = true;
        for sink in &sinks {
            if !sink.write(&line) {
                accepted = false;
            }
        }
        accepted
    }

    /// Log at [`Level::Debug`].
    pub fn debug(&self, module: &str, message: impl Into<String>) -> bool {
        self.log(Level::Debug, module, message, Fields::new())
    }

    /// Log at [`Level::Debug`] with metadata.
    pub fn debug_with(&self, module: &str, message: impl Into<String>, fields: Fields) -> bool {
        self.log(Level::Debug, module, message, fields)
    }

    /// Log at [`Level::Info`].
    pub fn info(&self, module: &str, message: impl Into<String>) -> bool {
        self.log(Level::Info, module, message, Fields::new())
    }

    /// Log at [`Level::Info`] with metadata.
    pub fn info_with(&self, module: &str, message: impl Into<String>, fields: Fields) -> bool {
        self.log(Level::Info, module, message, fields)
    }

    /// Log at [`Level::Warning`].
    pub fn warning(&self, module: &str, message: impl Into<String>) -> bool {
        self.log(Level::Warning, module, message, Fields::new())
    }

    /// Log at [`Level::Warning`] with metadata.
    pub fn warning_with(&self, module: &str, message: impl Into<String>, fields: Fields) -> bool {
        self.log(Level::Warning, module, message, fields)
    }

    /// Log at [`Level::Error`].
    pub fn error(&self, module: &str, message: impl Into<String>) -> bool {
        self.log(Level::Error, module, message, Fields::new())
    }

    /// Log at [`Level::Error`] with metadata.
    pub fn error_with(&self, module: &str, message: impl Into<String>, fields: Fields) -> bool {
        self.log(Level::Error, module, message, fields)
    }

    /// Log at [`Level::Critical`].
    pub fn critical(&self, module: &str, message: impl Into<String>) -> bool {
        self.log(Level::Critical, module, message, Fields::new())
    }

    /// Log at [`Level::Critical`] with metadata.
    pub fn critical_with(&self, module: &str, message: impl Into<String>, fields: Fields) -> bool {
        self.log(Level::Critical, module, message, fields)
    }

    /// Flush every attached sink.
    pub fn flush(&self) {
        for sink in self
            .sinks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            sink.flush();
        }
    }

    /// Close every attached sink. Idempotent.
    pub fn close(&self) {
        for sink in self
            .sinks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            sink.close();
        }
    }
}
