//! Log severity levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered from least to most severe.
///
/// The numeric codes are part of the output contract (`%(levelno)s` and the
/// JSON `level_value` key), so they are fixed discriminants rather than an
/// implementation detail.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Diagnostic detail, normally filtered out in production.
    Debug = 10,
    /// Routine operational events.
    Info = 20,
    /// Something unexpected that the process can absorb.
    Warning = 30,
    /// An operation failed.
    Error = 40,
    /// The process is in serious trouble.
    Critical = 50,
}

impl Level {
    /// Numeric severity code.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Upper-case severity name, as rendered by formatters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognized level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn numeric_codes() {
        assert_eq!(Level::Debug.value(), 10);
        assert_eq!(Level::Info.value(), 20);
        assert_eq!(Level::Warning.value(), 30);
        assert_eq!(Level::Error.value(), 40);
        assert_eq!(Level::Critical.value(), 50);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("ERROR".parse::<Level>().unwrap(), Level::Error);
        assert!("verbose".parse::<Level>().is_err());
    }
}
