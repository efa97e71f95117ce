//! Errors returned when building or installing loggers.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::format::TemplateError;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logger name must not be empty")]
    EmptyName,

    #[error("invalid log file name `{0}`: expected a plain file name")]
    InvalidFileName(String),

    #[error("invalid line format: {0}")]
    Format(#[from] TemplateError),

    #[error("cannot create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open log file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: tracing_appender::rolling::InitError,
    },

    #[error("the global logger manager is already initialized")]
    AlreadyInitialized,

    #[error("cannot install global subscriber: {0}")]
    GlobalSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
