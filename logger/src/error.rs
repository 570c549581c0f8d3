use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a logger from being configured.
///
/// Everything else the logger does degrades silently; only the log file
/// itself is allowed to fail loudly.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to create log directory {}: {source}", path.display())]
    CreateLogDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open log file {}: {source}", path.display())]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
