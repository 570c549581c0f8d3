//! Named project loggers writing to the console and a file at the project root.
//!
//! - **`registry`**: one [`Logger`] per name, sinks attached exactly once
//! - **`sink`**: console and append-mode file destinations
//! - **`header`**: the `=== RUN START ===` block of environment facts
//! - **`layer`**: forwards `tracing` events into a [`Logger`]
//!
//! ```no_run
//! let logger = projkit_logger::get_logger("demo")?;
//! projkit_logger::log_header(&logger, "demo");
//! logger.info("ready");
//! # Ok::<(), projkit_logger::LoggerError>(())
//! ```

mod error;
mod header;
mod layer;
mod logger;
mod registry;
mod sink;

pub use error::LoggerError;
pub use header::{CI_ENV_VAR, DiagnosticHeader, RUN_START_MARKER, log_header};
pub use layer::LoggerLayer;
pub use logger::Logger;
pub use projkit_types::Level;
pub use registry::{DEFAULT_LOG_FILE_NAME, LoggerOptions, LoggerRegistry};
pub use sink::SinkKind;

/// The process-wide logger for `name` at `INFO`, logging to `project.log` at
/// the project root.
///
/// Idempotent: every call with the same name returns the same logger, and
/// sinks are attached only on the first call.
pub fn get_logger(name: &str) -> Result<Logger, LoggerError> {
    get_logger_with(name, &LoggerOptions::default())
}

/// [`get_logger`] with an explicit level and log file name.
///
/// The level is reapplied on every call; the file name only takes effect on
/// the first call for `name`.
pub fn get_logger_with(name: &str, options: &LoggerOptions) -> Result<Logger, LoggerError> {
    LoggerRegistry::global().acquire(name, options)
}
