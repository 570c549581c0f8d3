//! Privacy-safe run header.
//!
//! `gather` is the boundary that reads the OS, environment and working
//! directory; `lines` is pure rendering.

use std::env;
use std::path::{Path, PathBuf};

use projkit_diagnostics::{DiagnosticsProvider, ReadEnv, SystemDiagnostics, SystemEnv};
use projkit_paths::{display_name, resolve_root, sanitize_relative};

use crate::logger::Logger;

/// First line of every header.
pub const RUN_START_MARKER: &str = "=== RUN START ===";

/// Set to any non-empty value inside GitHub Actions runners.
pub const CI_ENV_VAR: &str = "GITHUB_ACTIONS";

/// Environment facts reported at the start of a run.
///
/// Holds only display-safe values: the root's own name rather than its
/// path, and the working directory relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticHeader {
    project: String,
    repo_dir: String,
    runtime: String,
    os: String,
    shell: String,
    cwd: String,
    github_actions: bool,
}

impl DiagnosticHeader {
    /// Gathers the header for the current process.
    ///
    /// Resolves the project root from the working directory on every call,
    /// independently of whatever root the logger was configured with.
    #[must_use]
    pub fn gather(project_name: &str) -> Self {
        let root = resolve_root(None);
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::gather_with(
            project_name,
            &root,
            &cwd,
            &SystemDiagnostics::new(),
            &SystemEnv,
        )
    }

    #[must_use]
    pub fn gather_with(
        project_name: &str,
        root: &Path,
        cwd: &Path,
        diagnostics: &impl DiagnosticsProvider,
        env: &impl ReadEnv,
    ) -> Self {
        Self {
            project: project_name.to_string(),
            repo_dir: display_name(root),
            runtime: diagnostics.detect_runtime(),
            os: diagnostics.detect_os(),
            shell: diagnostics.detect_shell(),
            cwd: sanitize_relative(cwd, root),
            github_actions: env.non_empty(CI_ENV_VAR).is_some(),
        }
    }

    #[must_use]
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    #[must_use]
    pub fn repo_dir(&self) -> &str {
        &self.repo_dir
    }

    #[must_use]
    pub fn github_actions(&self) -> bool {
        self.github_actions
    }

    /// The eight header lines, in emission order.
    ///
    /// The interpreter line keeps the `python=` key; its value is the Rust
    /// toolchain version.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            RUN_START_MARKER.to_string(),
            format!("project={}", self.project),
            format!("repo_dir={}", self.repo_dir),
            format!("python={}", self.runtime),
            format!("os={}", self.os),
            format!("shell={}", self.shell),
            format!("cwd={}", self.cwd),
            format!("github_actions={}", self.github_actions),
        ]
    }

    /// Logs every line at `INFO`.
    pub fn emit(&self, logger: &Logger) {
        for line in self.lines() {
            logger.info(line);
        }
    }
}

/// Emits the standard run header for `project_name` through `logger`.
pub fn log_header(logger: &Logger, project_name: &str) {
    DiagnosticHeader::gather(project_name).emit(logger);
}
