//! Rendering of records into text or JSON lines
//!
//! Formatters are deterministic and never fail: unknown template
//! placeholders pass through untouched, metadata never overrides the
//! built-in fields, and an invalid time pattern falls back to the default.

use chrono::{DateTime, Local};
use scribe_logger::{Record, Render};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{PoisonError, RwLock};

/// Default line template.
pub const DEFAULT_TEMPLATE: &str = "[%(asctime)s] [%(levelname)s] [%(module)s] %(message)s";

/// Default timestamp pattern for text output.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default timestamp pattern for JSON output.
pub const DEFAULT_JSON_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format a point in time with a strftime-style pattern.
///
/// Pure function of its inputs. An unparseable pattern does not fail the
/// render; the default pattern is used instead.
#[must_use]
pub fn format_timestamp(instant: DateTime<Local>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", instant.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{}", instant.format(DEFAULT_TIME_FORMAT));
    }
    out
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Template-driven text formatter.
///
/// The template substitutes `%(fieldname)s` placeholders against the
/// built-in fields `asctime`, `levelname`, `levelno`, `module`, `message`
/// and `thread`, plus the record's metadata. Built-ins always win over
/// metadata of the same name. Template and time pattern are updatable
/// after construction; updates affect subsequent renders only.
pub struct PlainTextFormatter {
    template: RwLock<String>,
    time_format: RwLock<String>,
}

impl PlainTextFormatter {
    /// Create a formatter with an explicit template and time pattern.
    #[must_use]
    pub fn new(template: impl Into<String>, time_format: impl Into<String>) -> Self {
        Self {
            template: RwLock::new(template.into()),
            time_format: RwLock::new(time_format.into()),
        }
    }

    /// Minimal preset: `[time] LEVEL: message`.
    #[must_use]
    pub fn simple() -> Self {
        Self::new("[%(asctime)s] %(levelname)s: %(message)s", DEFAULT_TIME_FORMAT)
    }

    /// Verbose preset including the originating thread and millisecond
    /// timestamps.
    #[must_use]
    pub fn detailed() -> Self {
        Self::new(
            "[%(asctime)s] [%(levelname)s] [%(module)s] [%(thread)s] %(message)s",
            "%Y-%m-%d %H:%M:%S%.3f",
        )
    }

    /// Replace the template for subsequent renders.
    pub fn set_template(&self, template: impl Into<String>) {
        *self
            .template
            .write()
            .unwrap_or_else(PoisonError::into_inner) = template.into();
    }

    /// Replace the time pattern for subsequent renders.
    pub fn set_time_format(&self, pattern: impl Into<String>) {
        *self
            .time_format
            .write()
            .unwrap_or_else(PoisonError::into_inner) = pattern.into();
    }

    /// The current template.
    #[must_use]
    pub fn template(&self) -> String {
        self.template
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for PlainTextFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE, DEFAULT_TIME_FORMAT)
    }
}

impl Render for PlainTextFormatter {
    fn render(&self, record: &Record) -> String {
        let time_format = self
            .time_format
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        // Metadata first; built-ins inserted afterwards so same-named
        // caller fields are shadowed, not merged.
        let mut fields: BTreeMap<String, String> = record
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), stringify(value)))
            .collect();
        fields.insert(
            "asctime".to_string(),
            format_timestamp(record.timestamp, &time_format),
        );
        fields.insert("levelname".to_string(), record.level.name().to_string());
        fields.insert("levelno".to_string(), record.level.value().to_string());
        fields.insert("module".to_string(), record.module.clone());
        fields.insert("message".to_string(), record.message.clone());
        fields.insert("thread".to_string(), record.thread.clone());

        let mut line = self.template();
        for (key, value) in &fields {
            let placeholder = format!("%({key})s");
            if line.contains(&placeholder) {
                line = line.replace(&placeholder, value);
            }
        }
        line
    }
}

/// Formatter producing one JSON object per line.
///
/// Keys are `timestamp`, `level`, `level_value`, `module`, `message`, then
/// the flattened metadata. Metadata values keep their native JSON types;
/// metadata never overrides the five built-in keys.
pub struct JsonFormatter {
    time_format: RwLock<String>,
}

impl JsonFormatter {
    /// Create a JSON formatter with an explicit time pattern.
    #[must_use]
    pub fn new(time_format: impl Into<String>) -> Self {
        Self {
            time_format: RwLock::new(time_format.into()),
        }
    }

    /// Replace the time pattern for subsequent renders.
    pub fn set_time_format(&self, pattern: impl Into<String>) {
        *self
            .time_format
            .write()
            .unwrap_or_else(PoisonError::into_inner) = pattern.into();
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_JSON_TIME_FORMAT)
    }
}

impl Render for JsonFormatter {
    fn render(&self, record: &Record) -> String {
        let time_format = self
            .time_format
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut object = Map::new();
        object.insert(
            "timestamp".to_string(),
            Value::String(format_timestamp(record.timestamp, &time_format)),
        );
        object.insert(
            "level".to_string(),
            Value::String(record.level.name().to_string()),
        );
        object.insert("level_value".to_string(), Value::from(record.level.value()));
        object.insert("module".to_string(), Value::String(record.module.clone()));
        object.insert(
            "message".to_string(),
            Value::String(record.message.clone()),
        );

        for (key, value) in &record.fields {
            if !object.contains_key(key) {
                object.insert(key.clone(), value.clone());
            }
        }

        Value::Object(object).to_string()
    }
}
