//! The name → logger registry.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{load_from_env, validate_config, ConfigError, ConsoleStream, LoggingConfig};
use crate::error::LoggerError;
use crate::format::{Level, LineFormat, TemplateFormatter};
use crate::logger::{ConsoleSink, Logger, LoggerSpec};
use crate::manager::options::{default_file_name, LoggerOptions};

/// Builds and caches named loggers.
///
/// At most one [`Logger`] exists per name for the lifetime of the manager:
/// the first request builds it, every later request returns the same `Arc`.
pub struct LoggerManager {
    config: LoggingConfig,
    default_format: Arc<LineFormat>,
    console: ConsoleSink,
    loggers: DashMap<String, Arc<Logger>>,
}

impl LoggerManager {
    /// Create a manager over `config`, writing console output to the
    /// configured stream.
    pub fn new(config: LoggingConfig) -> Result<Self, LoggerError> {
        let console = match config.console_stream {
            ConsoleStream::Stdout => ConsoleSink::Stdout,
            ConsoleStream::Stderr => ConsoleSink::Stderr,
        };
        Self::with_console(config, console)
    }

    /// Create a manager whose console output goes to `console`.
    pub fn with_console(config: LoggingConfig, console: ConsoleSink) -> Result<Self, LoggerError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let default_format = Arc::new(LineFormat::parse(&config.format)?);

        Ok(Self {
            config,
            default_format,
            console,
            loggers: DashMap::new(),
        })
    }

    /// Create a manager from `LOGGER_MANAGER_*` environment variables.
    pub fn from_env() -> Result<Self, LoggerError> {
        Self::new(load_from_env()?)
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Get the logger called `name`, building it with default settings if needed.
    pub fn get_logger(&self, name: &str) -> Result<Arc<Logger>, LoggerError> {
        self.get_logger_with(name, LoggerOptions::default())
    }

    /// Get the logger called `name`, building it with `options` if needed.
    ///
    /// If the logger already exists it is returned as-is and `options` are
    /// ignored. A failed build caches nothing.
    pub fn get_logger_with(
        &self,
        name: &str,
        options: LoggerOptions,
    ) -> Result<Arc<Logger>, LoggerError> {
        if name.is_empty() {
            return Err(LoggerError::EmptyName);
        }
        if let Some(logger) = self.loggers.get(name) {
            return Ok(logger.value().clone());
        }

        match self.loggers.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let logger = Arc::new(self.resolve(name, options)?.build()?);
                tracing::debug!(
                    logger = %name,
                    level = %logger.level(),
                    file = ?logger.log_file(),
                    "Logger created"
                );
                Ok(entry.insert(logger).value().clone())
            }
        }
    }

    /// Application logger: console plus `app.log`.
    pub fn get_app_logger(&self) -> Result<Arc<Logger>, LoggerError> {
        self.get_logger_with(
            "app",
            LoggerOptions::new().console(true).file(true).file_name("app.log"),
        )
    }

    /// Database logger: console plus `database.log`.
    pub fn get_db_logger(&self) -> Result<Arc<Logger>, LoggerError> {
        self.get_logger_with(
            "db",
            LoggerOptions::new().console(true).file(true).file_name("database.log"),
        )
    }

    /// API logger: console plus `api.log`.
    pub fn get_api_logger(&self) -> Result<Arc<Logger>, LoggerError> {
        self.get_logger_with(
            "api",
            LoggerOptions::new().console(true).file(true).file_name("api.log"),
        )
    }

    /// Logger for the background task `task`, named `task.<task>`.
    ///
    /// Writes to the console and, when `to_file` is set, to `task_<task>.log`.
    pub fn get_task_logger(&self, task: &str, to_file: bool) -> Result<Arc<Logger>, LoggerError> {
        self.get_logger_with(
            &format!("task.{task}"),
            LoggerOptions::new()
                .console(true)
                .file(to_file)
                .file_name(format!("task_{task}.log")),
        )
    }

    /// Names and file paths of every cached logger that writes a file.
    pub fn loggers_with_logfiles(&self) -> BTreeMap<String, PathBuf> {
        self.loggers
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .log_file()
                    .map(|path| (entry.key().clone(), path.to_path_buf()))
            })
            .collect()
    }

    /// File path of the cached logger `name`, if it writes one.
    pub fn logfile_for(&self, name: &str) -> Option<PathBuf> {
        self.loggers
            .get(name)
            .and_then(|logger| logger.log_file().map(Path::to_path_buf))
    }

    /// Sorted names of every cached logger.
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Install the process-wide `tracing` subscriber.
    ///
    /// Events that do not go through a handle (library code, plain `tracing`
    /// macros) are written to the console in the configured format, with
    /// the event target in the `{name}` slot. `RUST_LOG` directives take
    /// precedence over `level`.
    pub fn install_global_subscriber(&self, level: Level) -> Result<(), LoggerError> {
        let formatter = TemplateFormatter::new(
            None,
            self.default_format.clone(),
            &self.config.time_format,
        );
        let filter = EnvFilter::builder()
            .with_default_directive(level.to_level_filter().into())
            .from_env_lossy();

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(formatter)
                    .with_writer(self.console.clone())
                    .with_ansi(self.config.ansi),
            )
            .try_init()?;
        Ok(())
    }

    fn resolve(&self, name: &str, options: LoggerOptions) -> Result<LoggerSpec, LoggerError> {
        let format = match options.format {
            Some(template) => Arc::new(LineFormat::parse(&template)?),
            None => self.default_format.clone(),
        };

        let to_console = options.to_console.unwrap_or(self.config.to_console);
        let to_file = options.to_file.unwrap_or(self.config.to_file);

        let file = if to_file {
            let file_name = options.file_name.unwrap_or_else(|| default_file_name(name));
            check_file_name(&file_name)?;
            Some(self.config.log_dir.join(file_name))
        } else {
            None
        };

        Ok(LoggerSpec {
            name: name.to_string(),
            level: options.level.unwrap_or(self.config.level),
            format,
            time_format: self.config.time_format.clone(),
            console: to_console.then(|| self.console.clone()),
            ansi: self.config.ansi,
            file,
        })
    }
}

/// File names must stay inside the log directory.
fn check_file_name(file_name: &str) -> Result<(), LoggerError> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(LoggerError::InvalidFileName(file_name.to_string())),
    }
}

impl std::fmt::Debug for LoggerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerManager")
            .field("config", &self.config)
            .field("loggers", &self.logger_names())
            .finish()
    }
}
