//! Optional per-project settings read from `<root>/projkit.toml`.
//!
//! ```toml
//! [project]
//! name = "demo"
//!
//! [logging]
//! level = "debug"
//! file = "logs/run.log"
//! ```
//!
//! Every field is optional; an absent file is the same as an empty one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use projkit_types::{Level, UnknownLevel};
use serde::Deserialize;
use thiserror::Error;
use toml::de::Error as TomlError;

/// File name looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "projkit.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: TomlError,
    },
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjkitConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Logger name used when none is given on the command line.
    pub name: Option<String>,
}

/// ```toml
/// [logging]
/// level = "warning"
/// file = "project.log"
/// ```
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Kept as a raw string; the logger parses it leniently.
    pub level: Option<String>,
    /// Log file path relative to the project root.
    pub file: Option<String>,
}

impl LoggingConfig {
    /// Strictly parses `level`, so typos can be reported before the logger
    /// silently falls back to `INFO`.
    pub fn validate(&self) -> Result<Option<Level>, UnknownLevel> {
        self.level.as_deref().map(str::parse::<Level>).transpose()
    }
}

impl ProjkitConfig {
    /// Reads `<root>/projkit.toml`. `Ok(None)` when the file does not exist.
    pub fn load(root: &Path) -> Result<Option<Self>, ConfigError> {
        let path = Self::path(root);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path, source })
    }

    /// Like [`ProjkitConfig::load`], but failures are logged and replaced
    /// with the defaults.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        match Self::load(root) {
            Ok(config) => {
                let config = config.unwrap_or_default();
                if let Err(err) = config.logging.validate() {
                    tracing::warn!("{err}; falling back to INFO");
                }
                config
            }
            Err(err) => {
                tracing::warn!("Ignoring {CONFIG_FILE_NAME}: {err}");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }
}
