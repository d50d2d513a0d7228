use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "nujan.log";
const DEFAULT_FILTER: &str = "nujan=info";

/// Keeps the file worker alive; dropping it flushes the log file.
pub struct Logging {
    _worker: WorkerGuard,
    dir: PathBuf,
    activity: Option<Receiver<String>>,
}

impl Logging {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Formatted lines for the activity log. Can be taken once.
    pub fn take_activity_rx(&mut self) -> Option<Receiver<String>> {
        self.activity.take()
    }
}

/// Writes every event to the log file and, once the event is complete,
/// forwards its lines to the activity channel.
struct EventWriter {
    file: NonBlocking,
    event: Vec<u8>,
    activity: Sender<String>,
}

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file.write(buf)?;
        self.event.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        for line in String::from_utf8_lossy(&self.event).lines() {
            if self.activity.send(line.to_string()).is_err() {
                break;
            }
        }
    }
}

#[derive(Clone)]
struct EventWriters {
    file: NonBlocking,
    activity: Sender<String>,
}

impl<'a> MakeWriter<'a> for EventWriters {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            file: self.file.clone(),
            event: Vec::with_capacity(256),
            activity: self.activity.clone(),
        }
    }
}

fn log_dir() -> io::Result<PathBuf> {
    if let Ok(dir) = nujan::kernel::services::adapters::ensure_log_dir() {
        return Ok(dir);
    }
    let dir = std::env::temp_dir().join("nujan").join("logs");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Installs the global subscriber. `None` when no log directory is usable or
/// a subscriber is already installed.
pub fn init() -> Option<Logging> {
    let dir = log_dir().ok()?;

    let (file, worker) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, LOG_FILE));
    let (activity_tx, activity_rx) = mpsc::channel();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(EventWriters {
            file,
            activity: activity_tx,
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok()?;

    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "panic");
    }));
    tracing::info!(log_dir = %dir.display(), "tracing initialized");

    Some(Logging {
        _worker: worker,
        dir,
        activity: Some(activity_rx),
    })
}
