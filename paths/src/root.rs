//! Boundary: locates the project root by probing the filesystem.
//!
//! Nothing is cached. Every call re-walks the ancestor chain, so concurrent
//! callers share no state.

use std::env;
use std::path::{self, Component, Path, PathBuf};

/// Entries whose presence marks a directory as a project root.
///
/// `.git` is usually a directory but may be a file (worktrees, submodules).
pub const DEFAULT_MARKERS: &[&str] = &[".git", "Cargo.toml", "pyproject.toml"];

/// Resolves project roots against a fixed set of marker names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLocator {
    markers: Vec<String>,
}

impl Default for RootLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl RootLocator {
    /// Locator for [`DEFAULT_MARKERS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_markers(DEFAULT_MARKERS.iter().copied())
    }

    /// Locator for a custom marker list.
    ///
    /// Markers must be single path components (`Cargo.toml`, `.hg`). Empty
    /// names, absolute paths and anything containing a separator or `..` are
    /// dropped, since a marker is only ever probed directly inside a candidate.
    #[must_use]
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let markers = markers
            .into_iter()
            .map(Into::into)
            .filter(|marker| is_single_component(marker))
            .collect();
        Self { markers }
    }

    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Whether `dir` directly contains any marker entry.
    #[must_use]
    pub fn is_root(&self, dir: &Path) -> bool {
        self.markers.iter().any(|marker| dir.join(marker).exists())
    }

    /// Returns the nearest ancestor of `start` (inclusive) containing a marker.
    ///
    /// `None` starts from the current working directory. When no ancestor
    /// qualifies, the canonicalized start is returned unchanged.
    #[must_use]
    pub fn resolve(&self, start: Option<&Path>) -> PathBuf {
        let here = canonical_start(start);

        for (depth, dir) in here.ancestors().enumerate() {
            if self.is_root(dir) {
                tracing::debug!(depth, "Resolved project root");
                return dir.to_path_buf();
            }
        }

        tracing::debug!(
            markers = ?self.markers,
            "No project marker found; using start directory"
        );
        here
    }
}

/// Resolves the project root for `start` using [`DEFAULT_MARKERS`].
#[must_use]
pub fn resolve_root(start: Option<&Path>) -> PathBuf {
    RootLocator::new().resolve(start)
}

fn canonical_start(start: Option<&Path>) -> PathBuf {
    let start = match start {
        Some(dir) => dir.to_path_buf(),
        None => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    start
        .canonicalize()
        .or_else(|_| path::absolute(&start))
        .unwrap_or(start)
}

fn is_single_component(marker: &str) -> bool {
    let mut components = Path::new(marker).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
