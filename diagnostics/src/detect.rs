//! Boundary: shell, OS and toolchain detection.
//!
//! Heuristics only. Every function returns a non-empty string and never
//! fails. Nothing here reads usernames, hostnames or full paths.

use std::env::consts;

use crate::env::{ReadEnv, SystemEnv};

/// Placeholder for facts that could not be determined.
pub const UNKNOWN: &str = "unknown";

const RUSTC_VERSION_LINE: &str = env!("PROJKIT_RUSTC_VERSION");

/// Best-effort guess at the user's shell, from the process environment.
#[must_use]
pub fn detect_shell() -> String {
    detect_shell_from(&SystemEnv)
}

/// Shell detection over an arbitrary environment.
///
/// Precedence: PowerShell (`PSModulePath`, refined by `ComSpec`), then the
/// final segment of `SHELL`, then `TERM`, then [`UNKNOWN`]. Empty values
/// count as unset.
#[must_use]
pub fn detect_shell_from(env: &impl ReadEnv) -> String {
    if env.non_empty("PSModulePath").is_some() {
        let comspec = env.var("ComSpec").unwrap_or_default().to_ascii_lowercase();
        let name = if comspec.contains("pwsh") {
            "pwsh"
        } else {
            "powershell"
        };
        return name.to_string();
    }

    if let Some(shell) = env.non_empty("SHELL")
        && let Some(name) = last_segment(&shell)
    {
        return name.to_string();
    }

    if let Some(term) = env.non_empty("TERM") {
        return term;
    }

    UNKNOWN.to_string()
}

/// `"<name> <release>"`, e.g. `"Linux 6.8.0"` or `"Darwin 24.1.0"`.
#[must_use]
pub fn detect_os() -> String {
    let (name, release) = os_name_release();
    format!("{name} {release}")
}

/// Version of the Rust toolchain this binary was compiled with, e.g. `"1.93.0"`.
#[must_use]
pub fn detect_runtime() -> String {
    runtime_version(RUSTC_VERSION_LINE)
}

fn runtime_version(version_line: &str) -> String {
    // `rustc 1.93.0 (254b59607 2026-01-19)`
    version_line
        .split_whitespace()
        .nth(1)
        .map_or_else(|| UNKNOWN.to_string(), ToString::to_string)
}

/// Final path segment, accepting both `/` and `\` separators.
fn last_segment(path: &str) -> Option<&str> {
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.is_empty())
}

fn fallback_os_name() -> String {
    let name = match consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    };
    name.to_string()
}

#[cfg(unix)]
fn os_name_release() -> (String, String) {
    uname().unwrap_or_else(|| (fallback_os_name(), UNKNOWN.to_string()))
}

#[cfg(not(unix))]
fn os_name_release() -> (String, String) {
    (fallback_os_name(), UNKNOWN.to_string())
}

/// `sysname` and `release` from `uname(2)`. `nodename` (the hostname) is never read.
#[cfg(unix)]
fn uname() -> Option<(String, String)> {
    use std::ffi::CStr;
    use std::mem::MaybeUninit;

    let mut info = MaybeUninit::<libc::utsname>::zeroed();
    // SAFETY: `uname` only writes into the provided buffer; it is read back
    // only after a successful return.
    let info = unsafe {
        if libc::uname(info.as_mut_ptr()) != 0 {
            return None;
        }
        info.assume_init()
    };

    // SAFETY: on success every `utsname` field is NUL-terminated.
    let (sysname, release) = unsafe {
        (
            CStr::from_ptr(info.sysname.as_ptr()),
            CStr::from_ptr(info.release.as_ptr()),
        )
    };

    let sysname = sysname.to_string_lossy().trim().to_string();
    let release = release.to_string_lossy().trim().to_string();
    if sysname.is_empty() {
        return None;
    }
    let release = if release.is_empty() {
        UNKNOWN.to_string()
    } else {
        release
    };
    Some((sysname, release))
}
