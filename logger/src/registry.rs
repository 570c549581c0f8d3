//! Process-wide registry of named loggers.
//!
//! One name maps to one [`Logger`] for the lifetime of the registry. The
//! global registry is created on first use and never reset.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use projkit_paths::resolve_root;
use projkit_types::Level;

use crate::error::LoggerError;
use crate::logger::Logger;
use crate::sink::{ConsoleSink, FileSink, Sink};

/// Log file created at the project root when no other name is given.
pub const DEFAULT_LOG_FILE_NAME: &str = "project.log";

static GLOBAL: LazyLock<LoggerRegistry> = LazyLock::new(LoggerRegistry::new);

/// Settings applied when acquiring a logger.
///
/// `level` is applied on every acquisition. `log_file_name` only matters on
/// the first one, when the sinks are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerOptions {
    pub level: Level,
    /// Relative to the project root.
    pub log_file_name: PathBuf,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: Level::Info,
            log_file_name: PathBuf::from(DEFAULT_LOG_FILE_NAME),
        }
    }
}

impl LoggerOptions {
    /// Options from a level name (parsed leniently, unknown names become
    /// `INFO`) and a log file name.
    #[must_use]
    pub fn new(level: &str, log_file_name: impl Into<PathBuf>) -> Self {
        Self {
            level: Level::parse_lenient(level),
            log_file_name: log_file_name.into(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_log_file_name(mut self, log_file_name: impl Into<PathBuf>) -> Self {
        self.log_file_name = log_file_name.into();
        self
    }
}

/// Name-to-logger map.
#[derive(Default)]
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Logger>>,
}

impl LoggerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`crate::get_logger`].
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// The logger registered under `name`, creating a bare one (no sinks,
    /// level `INFO`, propagating) if needed.
    #[must_use]
    pub fn get_or_create(&self, name: &str) -> Logger {
        self.loggers()
            .entry(name.to_string())
            .or_insert_with(|| Logger::new(name))
            .clone()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Logger> {
        self.loggers().get(name).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loggers().is_empty()
    }

    /// [`LoggerRegistry::acquire_at`] with the root resolved from the current
    /// working directory.
    pub fn acquire(&self, name: &str, options: &LoggerOptions) -> Result<Logger, LoggerError> {
        let root = resolve_root(None);
        self.acquire_at(&root, name, options)
    }

    /// Returns the logger for `name`, configured for console + file output.
    ///
    /// Creates the log file's parent directories, sets the level, and turns
    /// propagation off. Sinks are attached only if the logger has none yet:
    /// a console sink, then an append-mode file sink at
    /// `root/options.log_file_name`. Later calls with the same name leave the
    /// sinks alone, whatever file name they ask for.
    pub fn acquire_at(
        &self,
        root: &Path,
        name: &str,
        options: &LoggerOptions,
    ) -> Result<Logger, LoggerError> {
        let log_path = root.join(&options.log_file_name);
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent).map_err(|source| LoggerError::CreateLogDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let logger = self.get_or_create(name);
        logger.set_level(options.level);
        logger.set_propagate(false);

        let attached = logger.attach_once(|| {
            let file = FileSink::open(&log_path).map_err(|source| LoggerError::OpenLogFile {
                path: log_path.clone(),
                source,
            })?;
            Ok(vec![
                Box::new(ConsoleSink) as Box<dyn Sink>,
                Box::new(file),
            ])
        })?;

        if !attached {
            tracing::debug!(logger = name, "Logger already configured; reusing sinks");
        }
        Ok(logger)
    }

    fn loggers(&self) -> MutexGuard<'_, HashMap<String, Logger>> {
        self.loggers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
