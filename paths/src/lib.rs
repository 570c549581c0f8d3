//! Project root discovery and privacy-safe path display.
//!
//! - **`root`**: walk from a starting directory up to the nearest project marker
//! - **`sanitize`**: turn arbitrary paths into root-relative display strings
//!
//! Both are total: a missing marker or an unreadable path falls back to a
//! defined value instead of an error.

mod root;
mod sanitize;

pub use root::{DEFAULT_MARKERS, RootLocator, resolve_root};
pub use sanitize::{display_name, sanitize_relative};
