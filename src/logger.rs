//! Leveled logging capability for the client library.
//!
//! The library never logs through a global facade directly. Components
//! receive a [`Logger`] and the embedding application picks the adapter:
//! [`NoOpLogger`] (the default, silent), [`WriterLogger`] for any
//! `io::Write` sink, or [`TracingLogger`] to feed an existing `tracing`
//! subscriber.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

/// Severity of a log message, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Diagnostic detail.
    Debug,
    /// Normal operation.
    #[default]
    Info,
    /// Something unexpected that did not stop the operation.
    Warn,
    /// A failed operation.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        })
    }
}

/// The logging capability handed to library components.
pub trait Logger: Send + Sync {
    /// Log a debug message.
    fn debug(&self, message: &str);
    /// Log an informational message.
    fn info(&self, message: &str);
    /// Log a warning.
    fn warn(&self, message: &str);
    /// Log an error.
    fn error(&self, message: &str);
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Writes `"{timestamp} [{LEVEL}] {message}"` lines to a writer.
///
/// Messages below the configured minimum level are dropped. Writes are
/// serialised through a mutex so lines never interleave.
pub struct WriterLogger<W> {
    writer: Mutex<W>,
    level: Level,
}

impl<W: Write + Send> WriterLogger<W> {
    /// Create a logger writing to `writer` at the given minimum level.
    pub fn new(writer: W, level: Level) -> Self {
        Self {
            writer: Mutex::new(writer),
            level,
        }
    }

    /// The minimum level that is written.
    pub fn level(&self) -> Level {
        self.level
    }

    fn log(&self, level: Level, message: &str) {
        if level < self.level {
            return;
        }
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        // A poisoned lock only means another writer panicked mid-line.
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "{timestamp} [{level}] {message}");
    }
}

impl<W> fmt::Debug for WriterLogger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterLogger")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send> Logger for WriterLogger<W> {
    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Forwards messages to the current `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "bearer_inspect", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "bearer_inspect", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "bearer_inspect", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "bearer_inspect", "{message}");
    }
}
