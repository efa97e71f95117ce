//! The logger handle.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::Dispatch;

use crate::format::Level;

/// A named logger bound to its own level and outputs.
///
/// Handles are created by [`LoggerManager`](crate::manager::LoggerManager)
/// and shared as `Arc<Logger>`. Each one owns a private `tracing`
/// dispatcher, so two loggers never see each other's events.
pub struct Logger {
    name: String,
    level: Level,
    log_file: Option<PathBuf>,
    to_console: bool,
    dispatch: Dispatch,
}

impl Logger {
    pub(crate) fn new(
        name: String,
        level: Level,
        log_file: Option<PathBuf>,
        to_console: bool,
        dispatch: Dispatch,
    ) -> Self {
        Self {
            name,
            level,
            log_file,
            to_console,
            dispatch,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Path of the file this logger appends to, if it writes one.
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn writes_to_console(&self) -> bool {
        self.to_console
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Emit `message` at `level`. Messages below the logger's level are dropped.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if !self.is_enabled_for(level) {
            return;
        }
        tracing::dispatcher::with_default(&self.dispatch, || match level {
            Level::Debug => tracing::debug!("{}", message),
            Level::Info => tracing::info!("{}", message),
            Level::Warning => tracing::warn!("{}", message),
            Level::Error => tracing::error!("{}", message),
            Level::Critical => tracing::error!(critical = true, "{}", message),
        });
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Level::Critical, message);
    }

    /// Run `f` with this logger as the thread's default `tracing` dispatcher.
    ///
    /// Plain `tracing` macros inside `f` are written through this logger's
    /// outputs and format. Structured fields render in the `{fields}` slot.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("log_file", &self.log_file)
            .field("to_console", &self.to_console)
            .finish()
    }
}
