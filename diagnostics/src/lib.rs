//! Privacy-safe environment detection for run headers.
//!
//! | Concern | Trait | Production | Test |
//! |---------|-------|------------|------|
//! | Env vars | [`ReadEnv`] | [`SystemEnv`] | [`MapEnv`]* |
//! | Facts | [`DiagnosticsProvider`] | [`SystemDiagnostics`] | [`FixedDiagnostics`]* |
//!
//! *Available with `#[cfg(test)]` or the `"test-support"` feature.

mod detect;
mod env;
mod provider;

pub use detect::{UNKNOWN, detect_os, detect_runtime, detect_shell, detect_shell_from};
#[cfg(any(test, feature = "test-support"))]
pub use env::MapEnv;
pub use env::{ReadEnv, SystemEnv};
#[cfg(any(test, feature = "test-support"))]
pub use provider::FixedDiagnostics;
pub use provider::{DiagnosticsProvider, SystemDiagnostics};
