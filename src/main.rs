//! Logger manager demo service.
//!
//! Loads `LOGGER_MANAGER_*` configuration, installs the process-wide
//! manager, and serves the log viewer for the loggers it creates.
//!
//! # Architecture Overview
//!
//! ```text
//!   env / TOML ──▶ config ──▶ LoggerManager ──▶ Logger("app"), Logger("api"), ...
//!                                  │                   │
//!                                  │                   ├──▶ console
//!                                  │                   └──▶ <log_dir>/<file>.log
//!                                  ▼                              │
//!                           viewer router ◀── read_tail ──────────┘
//!                                  │
//!   browser ◀── HTML / JSON / WebSocket
//! ```

use tokio::net::TcpListener;

use logger_manager::{config, HttpServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_from_env()?;
    let bind_address = config.viewer.bind_address.clone();

    let manager = logger_manager::init(config)?;
    manager.install_global_subscriber(manager.config().level)?;

    let app = manager.get_app_logger()?;
    app.info(format!("logger-manager v{} starting", env!("CARGO_PKG_VERSION")));

    tracing::info!(
        level = %manager.config().level,
        log_dir = %manager.config().log_dir.display(),
        to_console = manager.config().to_console,
        to_file = manager.config().to_file,
        "Configuration loaded"
    );

    let server = HttpServer::new(manager.clone())?;
    let listener = TcpListener::bind(&bind_address).await?;
    let local_addr = listener.local_addr()?;

    app.info(format!(
        "Log viewer at http://{}{}/",
        local_addr,
        manager.config().viewer.prefix
    ));

    server.run(listener).await?;

    app.info("Shutdown complete");
    Ok(())
}
