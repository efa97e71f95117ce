//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the logger
//! manager. All types derive Serde traits so an optional TOML file can
//! supply values before environment overrides are applied.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::format::{Level, LineFormat};

/// Root configuration: defaults applied to every logger the manager builds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level for loggers that do not override it.
    pub level: Level,

    /// Line template, e.g. `{time} - {name} - {level} - {message}`.
    pub format: String,

    /// chrono strftime pattern used for `{time}`.
    pub time_format: String,

    /// Directory that file outputs are created in.
    pub log_dir: PathBuf,

    /// Write to the console unless a logger says otherwise.
    pub to_console: bool,

    /// Write to `<log_dir>/<file>` unless a logger says otherwise.
    pub to_file: bool,

    /// Console stream.
    pub console_stream: ConsoleStream,

    /// Colourise level names on the console.
    pub ansi: bool,

    /// Log viewer settings.
    pub viewer: ViewerConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: LineFormat::DEFAULT.to_string(),
            time_format: "%Y-%m-%d %H:%M:%S,%3f".to_string(),
            log_dir: PathBuf::from("logs"),
            to_console: true,
            to_file: false,
            console_stream: ConsoleStream::Stdout,
            ansi: false,
            viewer: ViewerConfig::default(),
        }
    }
}

/// Console stream selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

impl std::str::FromStr for ConsoleStream {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdout" => Ok(ConsoleStream::Stdout),
            "stderr" => Ok(ConsoleStream::Stderr),
            _ => Err("expected `stdout` or `stderr`".to_string()),
        }
    }
}

/// Log viewer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Route prefix for the HTML page and JSON endpoints.
    pub prefix: String,

    /// Number of trailing lines sent per refresh.
    pub tail_lines: usize,

    /// WebSocket refresh interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Bind address for the bundled server binary.
    pub bind_address: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            prefix: "/api/settings".to_string(),
            tail_lines: 30,
            poll_interval_ms: 1000,
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Get refresh interval as Duration
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}
