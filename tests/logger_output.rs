//! End-to-end checks of logger output through the public API.

use std::sync::Arc;

use logger_manager::{CaptureBuffer, Level, LoggerError, LoggerOptions};

mod common;

#[test]
fn test_accessor_returns_identical_handle() {
    let dir = tempfile::tempdir().unwrap();
    let manager = common::test_manager(dir.path(), &CaptureBuffer::new());

    let first = manager.get_db_logger().unwrap();
    let second = manager.get_db_logger().unwrap();
    let by_name = manager.get_logger("db").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &by_name));
}

#[test]
fn test_console_and_file_share_format() {
    let dir = tempfile::tempdir().unwrap();
    let buffer = CaptureBuffer::new();
    let manager = common::test_manager(dir.path(), &buffer);

    let app = manager.get_app_logger().unwrap();
    app.debug("not shown");
    app.info("started");
    app.warning("disk at 91%");
    app.error("request failed");

    let expected = vec![
        "app - INFO - started",
        "app - WARNING - disk at 91%",
        "app - ERROR - request failed",
    ];
    assert_eq!(buffer.lines(), expected);

    let file = std::fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert_eq!(file.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn test_per_logger_level_and_format() {
    let dir = tempfile::tempdir().unwrap();
    let buffer = CaptureBuffer::new();
    let manager = common::test_manager(dir.path(), &buffer);

    let verbose = manager
        .get_logger_with(
            "jobs.sync",
            LoggerOptions::new().level(Level::Debug).format("[{level}] {name}: {message}"),
        )
        .unwrap();
    let quiet = manager
        .get_logger_with("jobs.mail", LoggerOptions::new().level(Level::Error))
        .unwrap();

    verbose.debug("fetching page 1");
    quiet.warning("slow smtp");
    quiet.critical("smtp unreachable");

    assert_eq!(
        buffer.lines(),
        vec![
            "[DEBUG] jobs.sync: fetching page 1",
            "jobs.mail - CRITICAL - smtp unreachable",
        ]
    );
}

#[test]
fn test_task_loggers_get_their_own_files() {
    let dir = tempfile::tempdir().unwrap();
    let manager = common::test_manager(dir.path(), &CaptureBuffer::new());

    manager.get_task_logger("import", true).unwrap().info("imported 10 rows");
    manager.get_task_logger("export", true).unwrap().info("exported 4 rows");

    let import = std::fs::read_to_string(dir.path().join("task_import.log")).unwrap();
    let export = std::fs::read_to_string(dir.path().join("task_export.log")).unwrap();
    assert_eq!(import, "task.import - INFO - imported 10 rows\n");
    assert_eq!(export, "task.export - INFO - exported 4 rows\n");
}

#[test]
fn test_unwritable_log_dir_fails_on_first_use() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("logs");
    std::fs::write(&blocker, b"a file, not a directory").unwrap();
    let manager = common::test_manager(&blocker, &CaptureBuffer::new());

    let err = manager.get_app_logger().unwrap_err();
    assert!(matches!(err, LoggerError::CreateDir { .. }));

    // Console-only loggers do not touch the directory.
    assert!(manager.get_logger("console.only").is_ok());
    assert!(manager.loggers_with_logfiles().is_empty());
}
