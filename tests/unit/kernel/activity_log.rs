use super::*;
use std::sync::mpsc;

#[test]
fn create_log_appends_in_order() {
    let mut log = ActivityLog::default();
    log.create_log("Sandbox account created", LogKind::Info);
    log.create_log("Contract deployed", LogKind::Success);

    let messages: Vec<&str> = log.entries().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["Sandbox account created", "Contract deployed"]);
    assert_eq!(log.entries().last().unwrap().kind, LogKind::Success);
}

#[test]
fn capacity_drops_oldest() {
    let mut log = ActivityLog::new(2);
    log.create_log("one", LogKind::Info);
    log.create_log("two", LogKind::Info);
    log.create_log("three", LogKind::Error);

    assert_eq!(log.len(), 2);
    assert_eq!(log.entries().next().unwrap().message, "two");
}

#[test]
fn clear_empties() {
    let mut log = ActivityLog::default();
    log.create_log("x", LogKind::Warning);
    log.clear();
    assert!(log.is_empty());
}

#[test]
fn drain_channel_maps_levels() {
    let (tx, rx) = mpsc::channel();
    tx.send("2024-01-01T00:00:00Z ERROR nujan::kernel: build failed".to_string())
        .unwrap();
    tx.send("2024-01-01T00:00:00Z  WARN nujan::kernel: duplicate project id".to_string())
        .unwrap();
    tx.send("2024-01-01T00:00:00Z  INFO nujan: tracing initialized".to_string())
        .unwrap();

    let mut log = ActivityLog::default();
    assert_eq!(log.drain_channel(&rx), 3);
    let kinds: Vec<LogKind> = log.entries().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![LogKind::Error, LogKind::Warning, LogKind::Info]);
    assert_eq!(log.drain_channel(&rx), 0);
}
