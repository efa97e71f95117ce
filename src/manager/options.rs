//! Per-logger overrides.

use crate::format::Level;

/// Settings a caller may override when requesting a logger.
///
/// Every `None` falls back to the manager's configured default. Options only
/// matter the first time a name is requested; later requests return the
/// cached handle untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerOptions {
    pub level: Option<Level>,
    pub to_console: Option<bool>,
    pub to_file: Option<bool>,
    /// File name inside the log directory. Defaults to `<last name segment>.log`.
    pub file_name: Option<String>,
    pub format: Option<String>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn console(mut self, enabled: bool) -> Self {
        self.to_console = Some(enabled);
        self
    }

    pub fn file(mut self, enabled: bool) -> Self {
        self.to_file = Some(enabled);
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// `<last dot-separated segment of name>.log`
pub fn default_file_name(name: &str) -> String {
    let last = name.rsplit('.').next().unwrap_or(name);
    format!("{last}.log")
}
