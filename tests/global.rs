//! Installing a logger as the global `tracing` dispatcher.
//!
//! Kept in its own test binary: the global dispatcher can only be set once
//! per process.

use slogtool::{Level, Logger, LoggerError};

mod common;

use common::SharedBuffer;

#[test]
fn test_install_global_routes_plain_tracing_events() {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder(Level::Info)
        .writer(buffer.clone())
        .build()
        .unwrap();

    logger.install_global().unwrap();

    tracing::debug!("below the floor");
    tracing::info!(user_id = 7, admin = false, ratio = 0.5, name = "alice", "login");

    let records = buffer.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "INFO");
    assert_eq!(records[0]["msg"], "login");
    assert_eq!(records[0]["user_id"], 7);
    assert_eq!(records[0]["admin"], false);
    assert_eq!(records[0]["ratio"], 0.5);
    assert_eq!(records[0]["name"], "alice");

    let again = logger.install_global();
    assert!(matches!(again, Err(LoggerError::Global(_))));
}
