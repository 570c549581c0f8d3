//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tempfile::TempDir;

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Switches the process working directory until dropped.
///
/// The working directory is process-global, so every test that changes it
/// holds this guard; tests that don't touch it may still run in parallel.
pub struct CwdGuard {
    previous: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    pub fn enter(dir: &Path) -> Self {
        let lock = CWD_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = env::current_dir().expect("current dir readable");
        env::set_current_dir(dir).expect("enter test dir");
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.previous);
    }
}

/// A temporary project: canonical root containing `Cargo.toml`.
pub struct Project {
    _dir: TempDir,
    pub root: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        Self::in_tempdir(tempfile::tempdir().expect("create tempdir"))
    }

    /// A project inside the user's home directory, so any leaked absolute
    /// path would carry the home prefix. `None` without a writable home.
    pub fn under_home() -> Option<(Self, PathBuf)> {
        let home = dirs::home_dir()?.canonicalize().ok()?;
        let dir = tempfile::Builder::new()
            .prefix(".projkit-test-")
            .tempdir_in(&home)
            .ok()?;
        Some((Self::in_tempdir(dir), home))
    }

    fn in_tempdir(dir: TempDir) -> Self {
        let root = dir
            .path()
            .canonicalize()
            .expect("canonicalize tempdir")
            .join("sample-project");
        fs::create_dir(&root).expect("create project root");
        fs::write(root.join("Cargo.toml"), "[package]\nname = \"sample\"\n")
            .expect("write manifest");
        Self { _dir: dir, root }
    }

    /// Creates `root/relative` (and parents) and returns it.
    pub fn subdir(&self, relative: &str) -> PathBuf {
        let dir = self.root.join(relative);
        fs::create_dir_all(&dir).expect("create subdir");
        dir
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative)).expect("read project file")
    }
}

/// The machine's hostname, as `uname -n` would report it.
#[cfg(unix)]
pub fn hostname() -> Option<String> {
    let mut buf = [0u8; 256];
    // SAFETY: `gethostname` writes at most `buf.len()` bytes into `buf`.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return None;
    }
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..end]).trim().to_string();
    (!name.is_empty()).then_some(name)
}
