//! Output destinations for rendered log lines.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use projkit_types::Level;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders one record as `timestamp | LEVEL | logger-name | message`.
///
/// Both sinks of a logger share this format; the timestamp has one-second
/// resolution.
#[must_use]
pub(crate) fn format_line(
    timestamp: NaiveDateTime,
    level: Level,
    logger: &str,
    message: &str,
) -> String {
    format!(
        "{} | {level} | {logger} | {message}",
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Console,
    File,
}

impl SinkKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SinkKind::Console => "console",
            SinkKind::File => "file",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A destination for fully rendered lines.
///
/// Callers serialize access (the owning logger holds its sink lock while
/// writing), so implementations only need `&self`.
pub(crate) trait Sink: Send + Sync {
    fn kind(&self) -> SinkKind;

    /// Writes `line` plus a trailing newline in a single call.
    fn write_line(&self, line: &str) -> io::Result<()>;

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    /// Backing file, for sinks that have one.
    fn path(&self) -> Option<&Path> {
        None
    }
}

/// Mirrors lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ConsoleSink;

impl Sink for ConsoleSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(terminated(line).as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Appends lines to a UTF-8 file.
///
/// Unbuffered: each line reaches the file before `write_line` returns, and
/// goes out as one append-mode write.
#[derive(Debug)]
pub(crate) struct FileSink {
    path: PathBuf,
    file: File,
}

impl FileSink {
    /// Opens (creating if needed) `path` in append mode.
    pub(crate) fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }
}

impl Sink for FileSink {
    fn kind(&self) -> SinkKind {
        SinkKind::File
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        (&self.file).write_all(terminated(line).as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        (&self.file).flush()
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

fn terminated(line: &str) -> String {
    let mut buf = String::with_capacity(line.len() + 1);
    buf.push_str(line);
    buf.push('\n');
    buf
}
