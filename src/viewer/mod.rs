//! Log viewer HTTP surface.
//!
//! # Routes
//! - `GET {prefix}` redirects to `{prefix}/`
//! - `GET {prefix}/` serves the viewer page
//! - `GET {prefix}/logs/logger_names` lists loggers that write files
//! - `GET {prefix}/logs/tail?logger=&lines=` returns raw trailing lines
//! - `GET /ws/log?logger=` streams rendered tails over a WebSocket
//!
//! # Design Decisions
//! - Read-only: the viewer never creates loggers, it only sees cached ones
//! - Files are re-read on every tick; no inotify, no offsets

pub mod handlers;
pub mod page;
pub mod reader;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::config::{validate_viewer, ConfigError, ViewerConfig};
use crate::manager::LoggerManager;
use self::handlers::*;

pub const WS_PATH: &str = "/ws/log";

/// Logger whose file is streamed when the requested one has none.
pub const FALLBACK_LOGGER: &str = "app";

pub const NO_LOGFILE: &str = "No logfile configured for selected logger.";

/// Upper bound on `lines` accepted by the tail endpoint.
pub const MAX_TAIL_LINES: usize = 10_000;

/// State shared by the viewer handlers.
#[derive(Clone)]
pub struct ViewerState {
    pub manager: Arc<LoggerManager>,
    pub config: ViewerConfig,
}

/// Build the viewer router using the manager's viewer settings.
///
/// Those settings were validated when the manager was created.
pub fn router(manager: Arc<LoggerManager>) -> Router {
    let config = manager.config().viewer.clone();
    build_router(manager, config)
}

/// Build the viewer router with settings other than the manager's.
pub fn router_with(manager: Arc<LoggerManager>, config: ViewerConfig) -> Result<Router, ConfigError> {
    validate_viewer(&config).map_err(ConfigError::Validation)?;
    Ok(build_router(manager, config))
}

fn build_router(manager: Arc<LoggerManager>, config: ViewerConfig) -> Router {
    let prefix = config.prefix.clone();
    let state = ViewerState { manager, config };

    Router::new()
        .route(&prefix, get(redirect_to_slash))
        .route(&format!("{prefix}/"), get(index))
        .route(&format!("{prefix}/logs/logger_names"), get(logger_names))
        .route(&format!("{prefix}/logs/tail"), get(tail))
        .route(WS_PATH, get(log_socket))
        .with_state(state)
}
