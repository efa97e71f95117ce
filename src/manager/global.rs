//! The process-wide manager and its accessors.

use std::sync::{Arc, OnceLock};

use crate::config::LoggingConfig;
use crate::error::LoggerError;
use crate::logger::Logger;
use crate::manager::registry::LoggerManager;

static MANAGER: OnceLock<Arc<LoggerManager>> = OnceLock::new();

/// Install the process-wide manager built from `config`.
///
/// Fails if a manager is already installed, either by an earlier `init` or
/// by a [`global`] call that loaded one from the environment.
pub fn init(config: LoggingConfig) -> Result<Arc<LoggerManager>, LoggerError> {
    let manager = Arc::new(LoggerManager::new(config)?);
    MANAGER
        .set(manager.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    Ok(manager)
}

/// The process-wide manager, loaded from the environment on first use.
pub fn global() -> Result<Arc<LoggerManager>, LoggerError> {
    if let Some(manager) = MANAGER.get() {
        return Ok(manager.clone());
    }
    let loaded = Arc::new(LoggerManager::from_env()?);
    // Another thread may have won the race; its manager is the one kept.
    Ok(MANAGER.get_or_init(|| loaded).clone())
}

pub fn get_logger(name: &str) -> Result<Arc<Logger>, LoggerError> {
    global()?.get_logger(name)
}

pub fn get_app_logger() -> Result<Arc<Logger>, LoggerError> {
    global()?.get_app_logger()
}

pub fn get_db_logger() -> Result<Arc<Logger>, LoggerError> {
    global()?.get_db_logger()
}

pub fn get_api_logger() -> Result<Arc<Logger>, LoggerError> {
    global()?.get_api_logger()
}

pub fn get_task_logger(task: &str, to_file: bool) -> Result<Arc<Logger>, LoggerError> {
    global()?.get_task_logger(task, to_file)
}
