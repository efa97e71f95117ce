//! The process-wide `tracing` subscriber. Kept in its own test binary
//! because a global subscriber can only be installed once per process.

use logger_manager::{CaptureBuffer, ConsoleSink, Level, LoggerError, LoggerManager, LoggingConfig};

#[test]
fn test_global_subscriber_formats_plain_events() {
    let dir = tempfile::tempdir().unwrap();
    let buffer = CaptureBuffer::new();
    let mut config = LoggingConfig::default();
    config.log_dir = dir.path().to_path_buf();
    config.format = "{name} - {level} - {message}".into();
    let manager = LoggerManager::with_console(config, ConsoleSink::Capture(buffer.clone())).unwrap();

    manager.install_global_subscriber(Level::Warning).unwrap();

    tracing::info!(target: "worker", "below threshold");
    tracing::warn!(target: "worker", "queue is backing up");
    tracing::error!(target: "billing", "charge failed");

    assert_eq!(
        buffer.lines(),
        vec![
            "worker - WARNING - queue is backing up",
            "billing - ERROR - charge failed",
        ]
    );

    assert!(matches!(
        manager.install_global_subscriber(Level::Debug),
        Err(LoggerError::GlobalSubscriber(_))
    ));
}
