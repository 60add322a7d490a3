//! End-to-end behaviour of loggers writing to files and buffers.

use std::fs;
use std::io;

use slogtool::config::{load_config, parse_mode, resolve_verbosity};
use slogtool::logging::{ProgramInfo, Renderer};
use slogtool::{Attr, Level, Logger, LoggerError};

mod common;

use common::{read_records, SharedBuffer};

#[test]
fn test_prod_mode_file_output_is_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");

    let logger = Logger::new(resolve_verbosity(parse_mode("prod")), path.to_str().unwrap()).unwrap();
    assert_eq!(logger.renderer(), Renderer::Json);

    logger.debug("ignored", &[]);
    logger.info("started", &[]);

    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "INFO");
    assert_eq!(records[0]["msg"], "started");
    assert!(records[0]["program_info"]["rust_version"].is_string());
}

#[test]
fn test_file_output_appends_across_loggers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested.log");
    let output = path.to_str().unwrap();

    Logger::new(Level::Info, output).unwrap().info("first", &[]);
    Logger::new(Level::Warn, output).unwrap().warn("second", &[]);

    let records = read_records(&path);
    let messages: Vec<_> = records.iter().map(|r| r["msg"].as_str().unwrap()).collect();
    assert_eq!(messages, ["first", "second"]);
}

#[test]
fn test_unopenable_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("app.log");

    let err = Logger::new(Level::Info, path.to_str().unwrap()).unwrap_err();
    match &err {
        LoggerError::OpenFile { path: failed, source } => {
            assert_eq!(failed, &path);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(err.to_string().starts_with("error opening log file"));
}

#[test]
fn test_standard_streams_do_not_create_files() {
    let cwd = std::env::current_dir().unwrap();

    for output in ["stdout", "stderr"] {
        let logger = Logger::new(Level::Error, output).unwrap();
        assert_eq!(logger.level(), Level::Error);
        assert!(!cwd.join(output).exists());
    }
}

#[test]
fn test_dev_mode_renders_pretty_lines() {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder(resolve_verbosity(parse_mode("dev")))
        .writer(buffer.clone())
        .build()
        .unwrap();

    logger.info("started", &[]);

    let text = buffer.contents();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("started"));
    assert!(text.contains('\u{1b}'), "expected ANSI colors in {:?}", text);
    assert!(serde_json::from_str::<serde_json::Value>(text.trim()).is_err());
}

#[test]
fn test_request_scoped_loggers() {
    let buffer = SharedBuffer::new();
    let root = Logger::builder(Level::Info)
        .writer(buffer.clone())
        .program_info(ProgramInfo {
            rust_version: "1.85.0".to_string(),
        })
        .build()
        .unwrap();

    let handler = root.with_operation("get_user");
    let request = handler.with(&[
        root.string_attr("request_id", "abc"),
        root.any_attr("user_id", 42),
    ]);

    request.info("fetched", &[Attr::any("cache_hit", true)]);
    let err = request.log_and_return_error(
        "lookup failed",
        io::Error::new(io::ErrorKind::TimedOut, "db timeout"),
        &[],
    );
    handler.warn("slow", &[]);
    root.info("done", &[]);

    assert_eq!(err.kind(), io::ErrorKind::TimedOut);

    let records = buffer.records();
    assert_eq!(records.len(), 4);

    assert_eq!(records[0]["operation"], "get_user");
    assert_eq!(records[0]["request_id"], "abc");
    assert_eq!(records[0]["user_id"], 42);
    assert_eq!(records[0]["cache_hit"], true);

    assert_eq!(records[1]["level"], "ERROR");
    assert_eq!(records[1]["error"], "db timeout");
    assert_eq!(records[1]["request_id"], "abc");

    assert_eq!(records[2]["operation"], "get_user");
    assert!(records[2].get("request_id").is_none());

    assert!(records[3].get("operation").is_none());
    assert_eq!(records[3]["program_info"]["rust_version"], "1.85.0");
}

#[test]
fn test_config_file_to_logger() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("service.log");
    let config_path = dir.path().join("logging.toml");
    fs::write(
        &config_path,
        format!("mode = \"prod\"\noutput = {:?}\n", log_path.to_str().unwrap()),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let logger = config.try_init().unwrap();
    logger.error("crashed", None, &[]);

    let records = read_records(&log_path);
    assert_eq!(records[0]["level"], "ERROR");
    assert_eq!(records[0]["error"], "nil");
}
