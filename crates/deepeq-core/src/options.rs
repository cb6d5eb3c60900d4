//! Comparison options
//!
//! Options are plain data with serde support so they can live in a TOML
//! file next to the tests that use them:
//!
//! ```toml
//! cycle_policy = "strict"
//! max_depth = 64
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// How a revisited pair of reference-like values is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Any revisit is assumed equal; the pair is either verified already or
    /// being compared further up the stack
    #[default]
    Optimistic,
    /// Only pairs whose comparison has completed short-circuit; a revisit of
    /// a pair still in progress is reported as `CycleUnverified`
    Strict,
}

/// Options for [`deep_equal_with`](crate::deep_equal_with)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareOptions {
    pub cycle_policy: CyclePolicy,
    /// Deepest recursion level allowed; `None` means unbounded
    pub max_depth: Option<usize>,
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Parse options from TOML; missing keys take their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML, unknown keys or
    /// invalid values.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse an options file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` when the file cannot be read and
    /// `ConfigError::Parse` when its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
