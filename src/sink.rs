//! Event sinks - where detected signals end up
//!
//! The core emits `Event`s; a sink owns their delivery. The JSONL sink
//! appends one JSON object per line for downstream tooling, the log sink
//! just mirrors events onto the log output.

use crate::analytics_core::Event;
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub enum SinkError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::Io(err)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(err: serde_json::Error) -> Self {
        SinkError::Serialization(err)
    }
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Io(e) => write!(f, "IO error: {}", e),
            SinkError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for SinkError {}

/// Destination for emitted events.
#[async_trait]
pub trait EventSink: Send {
    async fn write_event(&mut self, event: &Event) -> Result<(), SinkError>;

    /// Flush pending writes.
    async fn flush(&mut self) -> Result<(), SinkError>;

    /// Sink type for logging.
    fn sink_type(&self) -> &'static str;
}

/// Appends events as JSONL to a file, flushing every few seconds.
pub struct JsonlEventSink {
    writer: BufWriter<std::fs::File>,
    last_flush: Instant,
    flush_interval: Duration,
}

impl JsonlEventSink {
    pub fn new(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        log::info!("📝 Writing events to: {}", path.display());

        Ok(Self {
            writer: BufWriter::new(file),
            last_flush: Instant::now(),
            flush_interval: Duration::from_secs(5),
        })
    }

    fn write_sync(&mut self, event: &Event) -> Result<(), SinkError> {
        let json = serde_json::to_string(event)?;
        writeln!(self.writer, "{}", json)?;

        if self.last_flush.elapsed() > self.flush_interval {
            self.writer.flush()?;
            self.last_flush = Instant::now();
        }
        Ok(())
    }
}

impl Drop for JsonlEventSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[async_trait]
impl EventSink for JsonlEventSink {
    async fn write_event(&mut self, event: &Event) -> Result<(), SinkError> {
        self.write_sync(event)
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }

    fn sink_type(&self) -> &'static str {
        "JSONL"
    }
}

/// Mirrors events onto the log output; useful when no file sink is wanted.
pub struct LogEventSink;

#[async_trait]
impl EventSink for LogEventSink {
    async fn write_event(&mut self, event: &Event) -> Result<(), SinkError> {
        match event {
            Event::Invalid { timestamp, reason } => {
                log::warn!("invalid record at {:?}: {}", timestamp, reason);
            }
            Event::StallDetected {
                timestamp, range, ..
            } => {
                log::info!("stall at {} (range {:.4})", timestamp, range);
            }
            Event::HotStreakDetected {
                timestamp, average, ..
            } => {
                log::info!("hot streak at {} (average {:.2})", timestamp, average);
            }
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    fn sink_type(&self) -> &'static str {
        "log"
    }
}
