//! User-visible activity log (build output, deploy results, errors).

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
    pub timestamp_ms: u64,
}

fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| u64::try_from(d.as_millis()).ok())
        .unwrap_or(0)
}

/// Level of a line produced by the `fmt` layer, e.g.
/// `2024-01-01T00:00:00Z  WARN nujan::kernel: message`.
fn kind_from_line(line: &str) -> LogKind {
    match line.split_whitespace().nth(1) {
        Some("ERROR") => LogKind::Error,
        Some("WARN") => LogKind::Warning,
        _ => LogKind::Info,
    }
}

pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn create_log(&mut self, message: impl Into<String>, kind: LogKind) {
        self.push(LogEntry {
            kind,
            message: message.into(),
            timestamp_ms: now_unix_ms(),
        });
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Pulls every pending line from the tracing tee without blocking.
    pub fn drain_channel(&mut self, rx: &Receiver<String>) -> usize {
        let mut count = 0;
        while let Ok(line) = rx.try_recv() {
            let kind = kind_from_line(&line);
            self.create_log(line, kind);
            count += 1;
        }
        count
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/activity_log.rs"]
mod tests;
