//! Privacy-safe path rendering.
//!
//! Output never contains an absolute path or a `..` segment: either the path
//! relative to the project root, or its final component alone.

use std::path::Path;

/// Renders `path` relative to `root` for display in logs.
///
/// Both paths are canonicalized first. Paths inside `root` come back
/// root-relative with native separators (`"."` for the root itself).
/// Anything else (outside the root, missing, unreadable) collapses to
/// [`display_name`].
#[must_use]
pub fn sanitize_relative(path: &Path, root: &Path) -> String {
    let (Ok(canonical), Ok(canonical_root)) = (path.canonicalize(), root.canonicalize()) else {
        return display_name(path);
    };

    match canonical.strip_prefix(&canonical_root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => display_name(path),
    }
}

/// Final component of `path`, or `"."` when it has none (`/`, `..`).
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string())
}
