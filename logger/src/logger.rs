//! Named logger handle.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Local;
use projkit_types::Level;

use crate::error::LoggerError;
use crate::sink::{Sink, SinkKind, format_line};

/// Shared handle to a named logger.
///
/// Clones point at the same logger; equality is identity, not value.
/// Obtain one through [`crate::get_logger`] or a [`crate::LoggerRegistry`].
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    name: String,
    level: AtomicU8,
    propagate: AtomicBool,
    sinks: Mutex<Vec<Box<dyn Sink>>>,
}

impl Logger {
    /// Fresh logger with no sinks, level `INFO`, propagation on.
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                name: name.into(),
                level: AtomicU8::new(Level::default().as_u8()),
                propagate: AtomicBool::new(true),
                sinks: Mutex::new(Vec::new()),
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_u8(self.inner.level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub fn set_level(&self, level: Level) {
        self.inner.level.store(level.as_u8(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Whether records are also forwarded to the global `tracing` dispatcher.
    #[must_use]
    pub fn propagates(&self) -> bool {
        self.inner.propagate.load(Ordering::Relaxed)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.inner.propagate.store(propagate, Ordering::Relaxed);
    }

    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks().len()
    }

    #[must_use]
    pub fn sink_kinds(&self) -> Vec<SinkKind> {
        self.sinks().iter().map(|sink| sink.kind()).collect()
    }

    /// Path of the file sink, once one is attached.
    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.sinks()
            .iter()
            .find_map(|sink| sink.path().map(PathBuf::from))
    }

    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Level::Critical, message);
    }

    /// Writes one record to every sink if `level` passes the logger's level.
    ///
    /// A failing sink does not stop the others. Failures are reported through
    /// `tracing` after the sink lock is released.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if !self.is_enabled_for(level) {
            return;
        }

        let message = message.to_string();
        let line = format_line(Local::now().naive_local(), level, self.name(), &message);

        let failures: Vec<(SinkKind, String)> = {
            let sinks = self.sinks();
            sinks
                .iter()
                .filter_map(|sink| {
                    sink.write_line(&line)
                        .err()
                        .map(|err| (sink.kind(), err.to_string()))
                })
                .collect()
        };

        for (sink, err) in failures {
            tracing::warn!(logger = self.name(), %sink, "Failed to write log line: {err}");
        }

        if self.propagates() {
            propagate(level, self.name(), &message);
        }
    }

    /// Flushes every sink, ignoring failures.
    pub fn flush(&self) {
        for sink in self.sinks().iter() {
            let _ = sink.flush();
        }
    }

    /// Attaches the sinks built by `make` unless some are already attached.
    ///
    /// The check and the attach happen under one lock, so concurrent callers
    /// cannot both attach. Returns whether this call attached anything.
    pub(crate) fn attach_once<F>(&self, make: F) -> Result<bool, LoggerError>
    where
        F: FnOnce() -> Result<Vec<Box<dyn Sink>>, LoggerError>,
    {
        let mut sinks = self.sinks();
        if !sinks.is_empty() {
            return Ok(false);
        }
        sinks.extend(make()?);
        Ok(true)
    }

    fn sinks(&self) -> MutexGuard<'_, Vec<Box<dyn Sink>>> {
        self.inner
            .sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("level", &self.level())
            .field("propagate", &self.propagates())
            .field("sinks", &self.sink_kinds())
            .finish()
    }
}

fn propagate(level: Level, logger: &str, message: &str) {
    match level {
        Level::Debug => tracing::debug!(logger, "{message}"),
        Level::Info => tracing::info!(logger, "{message}"),
        Level::Warning => tracing::warn!(logger, "{message}"),
        Level::Error | Level::Critical => tracing::error!(logger, "{message}"),
    }
}
