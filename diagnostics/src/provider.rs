use crate::detect::{detect_os, detect_runtime, detect_shell_from};
use crate::env::{ReadEnv, SystemEnv};

/// Source of the environment facts a run header reports.
///
/// Implementations must return non-empty strings and never panic.
pub trait DiagnosticsProvider {
    fn detect_shell(&self) -> String;
    fn detect_os(&self) -> String;
    fn detect_runtime(&self) -> String;
}

/// Detection against the real OS, reading variables through `E`.
#[derive(Debug, Clone, Default)]
pub struct SystemDiagnostics<E = SystemEnv> {
    env: E,
}

impl SystemDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self { env: SystemEnv }
    }
}

impl<E: ReadEnv> SystemDiagnostics<E> {
    #[must_use]
    pub fn with_env(env: E) -> Self {
        Self { env }
    }
}

impl<E: ReadEnv> DiagnosticsProvider for SystemDiagnostics<E> {
    fn detect_shell(&self) -> String {
        detect_shell_from(&self.env)
    }

    fn detect_os(&self) -> String {
        detect_os()
    }

    fn detect_runtime(&self) -> String {
        detect_runtime()
    }
}

/// Canned answers for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone)]
pub struct FixedDiagnostics {
    pub shell: String,
    pub os: String,
    pub runtime: String,
}

#[cfg(any(test, feature = "test-support"))]
impl Default for FixedDiagnostics {
    fn default() -> Self {
        Self {
            shell: "zsh".to_string(),
            os: "Linux 6.8.0".to_string(),
            runtime: "1.93.0".to_string(),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl DiagnosticsProvider for FixedDiagnostics {
    fn detect_shell(&self) -> String {
        self.shell.clone()
    }

    fn detect_os(&self) -> String {
        self.os.clone()
    }

    fn detect_runtime(&self) -> String {
        self.runtime.clone()
    }
}
