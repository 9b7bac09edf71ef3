//! Per-repository lifecycle configuration.

use crate::config::{ConfigError, Flag};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Lifecycle flags persisted for a repository.
///
/// Read from TOML with kebab-case keys:
/// ```toml
/// repo-is-activated = true
/// repo-is-onboarded = false
/// ```
/// A missing key leaves the flag [`Flag::Unset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RepoConfig {
    /// Whether the repository is activated.
    #[serde(default, rename = "repo-is-activated", alias = "activated")]
    pub activated: Flag,

    /// Whether the repository has completed onboarding.
    #[serde(default, rename = "repo-is-onboarded", alias = "onboarded")]
    pub onboarded: Flag,
}

impl RepoConfig {
    /// Creates a configuration from the two flags.
    #[must_use]
    pub fn new(activated: impl Into<Flag>, onboarded: impl Into<Flag>) -> Self {
        Self {
            activated: activated.into(),
            onboarded: onboarded.into(),
        }
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if `path` does not exist, or an I/O
    /// or parse error otherwise.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading repository configuration");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })
    }
}
