//! `projkit`: locate project roots and write diagnostic project logs.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use projkit_config::ProjkitConfig;
use projkit_diagnostics::{DiagnosticsProvider, ReadEnv, SystemDiagnostics, SystemEnv};
use projkit_logger::{DEFAULT_LOG_FILE_NAME, LoggerOptions, get_logger_with, log_header};
use projkit_paths::{RootLocator, resolve_root, sanitize_relative};
use projkit_types::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Overrides `[logging] level` from `projkit.toml`.
const LOG_LEVEL_ENV_VAR: &str = "PROJKIT_LOG_LEVEL";

/// Logger name when neither `--name` nor `[project] name` is set.
const DEFAULT_PROJECT_NAME: &str = "projkit";

#[derive(Parser)]
#[command(name = "projkit")]
#[command(about = "Locate project roots and write privacy-safe diagnostic logs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the nearest ancestor directory containing a project marker
    Root {
        /// Directory to start from (defaults to the current directory)
        #[arg(long)]
        start: Option<PathBuf>,
        /// Marker file or directory name; repeatable, replaces the defaults
        #[arg(long = "marker")]
        markers: Vec<String>,
    },
    /// Print a path relative to the project root, or its basename
    Sanitize {
        path: PathBuf,
        /// Project root (defaults to the resolved root)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Print the detected shell, OS and toolchain
    Diagnostics,
    /// Acquire a project logger, write the run header and one line per level
    Demo {
        /// Logger name (defaults to `[project] name`, then "projkit")
        #[arg(long)]
        name: Option<String>,
        /// Minimum level; beats PROJKIT_LOG_LEVEL and projkit.toml
        #[arg(long)]
        level: Option<String>,
        /// Log file relative to the project root
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    match Cli::parse().command {
        Commands::Root { start, markers } => {
            let locator = if markers.is_empty() {
                RootLocator::new()
            } else {
                RootLocator::with_markers(markers)
            };
            println!("{}", locator.resolve(start.as_deref()).display());
        }
        Commands::Sanitize { path, root } => {
            let root = root.unwrap_or_else(|| resolve_root(None));
            println!("{}", sanitize_relative(&path, &root));
        }
        Commands::Diagnostics => {
            for line in diagnostics_lines(&SystemDiagnostics::new()) {
                println!("{line}");
            }
        }
        Commands::Demo { name, level, file } => run_demo(name, level, file)?,
    }

    Ok(())
}

fn diagnostics_lines(provider: &impl DiagnosticsProvider) -> [String; 3] {
    [
        format!("shell={}", provider.detect_shell()),
        format!("os={}", provider.detect_os()),
        format!("python={}", provider.detect_runtime()),
    ]
}

fn run_demo(name: Option<String>, level: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let cwd = env::current_dir().context("Failed to read current directory")?;
    let root = resolve_root(Some(&cwd));
    let config = ProjkitConfig::load_or_default(&root);

    let name = name
        .or_else(|| config.project.name.clone())
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
    let options = demo_options(level.as_deref(), file.as_deref(), &SystemEnv, &config);
    tracing::debug!(
        logger = %name,
        level = %options.level,
        file = %options.log_file_name.display(),
        "Acquiring demo logger"
    );

    let logger = get_logger_with(&name, &options)
        .with_context(|| format!("Failed to set up logger '{name}'"))?;
    log_header(&logger, &name);
    for &level in Level::all() {
        logger.log(level, format!("sample {level} message"));
    }
    logger.flush();
    Ok(())
}

/// Layers the logger settings: command-line flag, then environment, then
/// `projkit.toml`, then the library defaults.
fn demo_options(
    level_flag: Option<&str>,
    file_flag: Option<&Path>,
    env: &impl ReadEnv,
    config: &ProjkitConfig,
) -> LoggerOptions {
    let level = level_flag
        .map(str::to_string)
        .or_else(|| env.non_empty(LOG_LEVEL_ENV_VAR))
        .or_else(|| config.logging.level.clone());
    let file = file_flag
        .map(Path::to_path_buf)
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE_NAME));

    LoggerOptions::new(level.as_deref().unwrap_or("INFO"), file)
}
