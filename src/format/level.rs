//! Severity levels for managed loggers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

/// Minimum severity a logger emits.
///
/// Ordered from least to most severe. Numeric values match the widely used
/// 10/20/30/40/50 scale so levels can be configured either by name or number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Upper-case name as rendered in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    pub fn value(self) -> u8 {
        match self {
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }

    /// The `tracing` filter admitting this level and everything above it.
    ///
    /// `Critical` has no `tracing` counterpart and maps to `ERROR`; the
    /// logger handle suppresses plain errors itself in that case.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Level::Debug => LevelFilter::DEBUG,
            Level::Info => LevelFilter::INFO,
            Level::Warning => LevelFilter::WARN,
            Level::Error | Level::Critical => LevelFilter::ERROR,
        }
    }

    /// Map a `tracing` event level back onto this scale.
    pub fn from_tracing(level: &tracing::Level, critical: bool) -> Self {
        if critical {
            return Level::Critical;
        }
        match *level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level `{0}` (expected DEBUG, INFO, WARNING, ERROR, CRITICAL or 10-50)")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let level = match trimmed.to_ascii_uppercase().as_str() {
            "DEBUG" | "10" => Level::Debug,
            "INFO" | "20" => Level::Info,
            "WARNING" | "WARN" | "30" => Level::Warning,
            "ERROR" | "40" => Level::Error,
            "CRITICAL" | "FATAL" | "50" => Level::Critical,
            _ => return Err(ParseLevelError(trimmed.to_string())),
        };
        Ok(level)
    }
}

impl TryFrom<String> for Level {
    type Error = ParseLevelError;

    fn try_from(value: String) -> Result<Self, ParseLevelError> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}
