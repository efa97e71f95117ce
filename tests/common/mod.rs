//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use logger_manager::{CaptureBuffer, ConsoleSink, HttpServer, LoggerManager, LoggingConfig};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Manager writing files under `dir` and console output into `buffer`.
pub fn test_manager(dir: &Path, buffer: &CaptureBuffer) -> Arc<LoggerManager> {
    let mut config = LoggingConfig::default();
    config.log_dir = dir.to_path_buf();
    config.format = "{name} - {level} - {message}".into();
    config.viewer.poll_interval_ms = 50;
    config.viewer.tail_lines = 5;
    Arc::new(LoggerManager::with_console(config, ConsoleSink::Capture(buffer.clone())).unwrap())
}

/// Serve `manager`'s viewer on an ephemeral port.
///
/// Dropping the returned sender shuts the server down.
#[allow(dead_code)]
pub async fn start_server(manager: Arc<LoggerManager>) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(manager).unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = server
            .run_until(listener, async move {
                let _ = rx.await;
            })
            .await;
    });

    (addr, tx)
}
