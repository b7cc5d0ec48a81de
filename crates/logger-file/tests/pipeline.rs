//! End-to-end: dispatch -> formatter -> rotating file sink

use scribe_logger::{fields, CaptureSink, Level, Logger};
use scribe_logger_file::{
    rotating_logger, FileLogger, FileLoggerConfig, JsonFormatter, PlainTextFormatter,
};
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn rotating_logger_writes_formatted_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = rotating_logger(FileLoggerConfig::new(&path).unwrap());

    assert!(logger.info("startup", "service listening"));
    assert!(logger.error("db", "connection refused"));
    logger.close();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[INFO] [startup] service listening"));
    assert!(lines[1].contains("[ERROR] [db] connection refused"));
}

#[test]
fn level_filter_applies_before_the_file_is_touched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = rotating_logger(FileLoggerConfig::new(&path).unwrap());
    logger.set_min_level(Level::Warning);

    assert!(!logger.debug("app", "filtered"));
    assert!(!logger.info("app", "filtered"));
    assert!(logger.warning("app", "kept"));
    logger.flush();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("kept"));
}

#[test]
fn json_pipeline_produces_one_object_per_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.jsonl");
    let logger = Logger::new(Arc::new(JsonFormatter::default()));
    logger.add_sink(Arc::new(FileLogger::new(
        FileLoggerConfig::new(&path).unwrap(),
    )));

    logger.info_with("auth", "login", fields! { "user_id" => 7, "mfa" => true });
    logger.warning("auth", "lockout imminent");
    logger.flush();

    let contents = fs::read_to_string(&path).unwrap();
    let objects: Vec<Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0]["module"], "auth");
    assert_eq!(objects[0]["user_id"], 7);
    assert_eq!(objects[0]["mfa"], true);
    assert_eq!(objects[1]["level"], "WARNING");
    assert_eq!(objects[1]["level_value"], 30);
}

#[test]
fn console_style_echo_receives_the_same_rendered_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let capture = CaptureSink::new();
    let logger = rotating_logger(FileLoggerConfig::new(&path).unwrap());
    logger.add_sink(Arc::new(capture.clone()));

    logger.info("app", "echoed");
    logger.flush();

    let file_line = fs::read_to_string(&path).unwrap();
    let captured = capture.lines();
    assert_eq!(captured.len(), 1);
    assert_eq!(file_line.trim_end(), captured[0]);
}

#[test]
fn renderer_swap_changes_subsequent_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = rotating_logger(FileLoggerConfig::new(&path).unwrap());

    logger.info("app", "templated");
    logger.set_renderer(Arc::new(JsonFormatter::default()));
    logger.info("app", "structured");
    logger.flush();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('['));
    assert!(serde_json::from_str::<Value>(lines[1]).is_ok());
}

#[test]
fn two_independent_file_sinks_on_one_logger() {
    let dir = tempdir().unwrap();
    let main_path = dir.path().join("main.log");
    let error_path = dir.path().join("error.log");

    let logger = rotating_logger(FileLoggerConfig::new(&main_path).unwrap());
    logger.add_sink(Arc::new(FileLogger::new(
        FileLoggerConfig::builder(&error_path)
            .max_file_size(5 * 1024)
            .backup_count(2)
            .build()
            .unwrap(),
    )));

    logger.warning("disk", "space low");
    logger.close();

    // Both sinks received the identical rendered line.
    assert_eq!(
        fs::read_to_string(&main_path).unwrap(),
        fs::read_to_string(&error_path).unwrap()
    );
}

#[test]
fn custom_template_reaches_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let formatter = PlainTextFormatter::new("%(levelname)s|%(module)s|%(message)s", "%H:%M:%S");
    let logger = Logger::new(Arc::new(formatter));
    logger.add_sink(Arc::new(FileLogger::new(
        FileLoggerConfig::new(&path).unwrap(),
    )));

    logger.critical("kernel", "out of memory");
    logger.flush();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "CRITICAL|kernel|out of memory\n"
    );
}
