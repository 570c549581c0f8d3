//! Environment variable access behind a trait, so detection can be tested
//! without touching the process environment.

use std::env;
#[cfg(any(test, feature = "test-support"))]
use std::collections::HashMap;

/// Read-only view of environment variables.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;

    /// The value of `key`, or `None` when unset, non-UTF-8 or empty.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).ok().filter(|value| !value.is_empty())
    }
}

/// Zero-sized type that delegates to `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

/// Fixed set of variables. Anything not inserted reads as unset.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

#[cfg(any(test, feature = "test-support"))]
impl MapEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ReadEnv for MapEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        self.vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }
}
