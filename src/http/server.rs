//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router: log viewer plus access logging
//! - Wire up middleware (tracing, access log)
//! - Bind server to listener
//! - Shut down gracefully on Ctrl+C or an external trigger

use std::future::Future;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::error::LoggerError;
use crate::http::middleware::access_log_middleware;
use crate::manager::LoggerManager;
use crate::viewer;

/// HTTP server exposing the log viewer of a [`LoggerManager`].
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Build the server. Requests are access-logged through the manager's
    /// `api` logger.
    pub fn new(manager: Arc<LoggerManager>) -> Result<Self, LoggerError> {
        let api_logger = manager.get_api_logger()?;

        let router = viewer::router(manager)
            .layer(middleware::from_fn_with_state(api_logger, access_log_middleware))
            .layer(TraceLayer::new_for_http());

        Ok(Self { router })
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run_until(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
