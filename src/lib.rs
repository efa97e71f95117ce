//! Named-logger factory for web services.
//!
//! One process-wide [`LoggerManager`] hands out [`Logger`] handles by name.
//! The first request for a name builds a logger from environment
//! configuration (level, line format, console and file destinations); every
//! later request returns the same handle.
//!
//! ```no_run
//! let app = logger_manager::get_app_logger()?;
//! app.info("service starting");
//!
//! let jobs = logger_manager::get_task_logger("cleanup", true)?;
//! jobs.warning("3 stale sessions left behind");
//! # Ok::<(), logger_manager::LoggerError>(())
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod logger;
pub mod manager;
pub mod viewer;

pub use config::{ConfigError, LoggingConfig};
pub use error::LoggerError;
pub use format::Level;
pub use http::HttpServer;
pub use logger::{CaptureBuffer, ConsoleSink, Logger};
pub use manager::{
    get_api_logger, get_app_logger, get_db_logger, get_logger, get_task_logger, global, init,
    LoggerManager, LoggerOptions,
};
