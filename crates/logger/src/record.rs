//! The structured log event

use crate::Level;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;

/// Open-ended event metadata, ordered by key.
///
/// Values are JSON values so that numeric and boolean metadata keep their
/// native types when rendered as JSON. The [`fields!`](crate::fields) macro
/// is the usual way to build one.
pub type Fields = BTreeMap<String, serde_json::Value>;

/// One structured log event, built per call and handed to a renderer.
///
/// The context label (`module`) is an explicit parameter supplied by the
/// caller; nothing here inspects the stack. Timestamp and thread name are
/// captured when the record is created, not when it is rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Severity of the event.
    pub level: Level,
    /// The log message.
    pub message: String,
    /// Caller-supplied context label (module or component name).
    pub module: String,
    /// When the event was created.
    pub timestamp: DateTime<Local>,
    /// Name of the thread that created the event.
    pub thread: String,
    /// Caller-supplied metadata.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: Fields,
}

impl Record {
    /// Create a record stamped with the current time and thread.
    pub fn new(level: Level, module: impl Into<String>, message: impl Into<String>) -> Self {
        let current = std::thread::current();
        let thread = current
            .name()
            .map_or_else(|| format!("{:?}", current.id()), str::to_string);

        Self {
            level,
            message: message.into(),
            module: module.into(),
            timestamp: Local::now(),
            thread,
            fields: Fields::new(),
        }
    }

    /// Attach caller metadata.
    #[must_use]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Override the captured timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_captures_module_and_message() {
        let record = Record::new(Level::Info, "billing", "payment accepted");
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.module, "billing");
        assert_eq!(record.message, "payment accepted");
        assert!(record.fields.is_empty());
        assert!(!record.thread.is_empty());
    }
}
