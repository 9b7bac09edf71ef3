//! Cycle report files.
//!
//! A cycle report lists the outcome of the last cycle for a set of
//! repositories together with their persisted lifecycle flags:
//!
//! ```toml
//! [[repository]]
//! name = "acme/widgets"
//! outcome = "done"
//! repo-is-activated = true
//!
//! [[repository]]
//! name = "acme/legacy"
//! outcome = "archived"
//! ```

use crate::config::{ConfigError, Flag, RepoConfig};
use crate::outcome::OutcomeCode;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Outcome of one repository's last cycle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CycleReport {
    /// Repository full name (e.g., "owner/repo").
    pub name: String,

    /// Outcome code produced by the cycle.
    pub outcome: OutcomeCode,

    /// Persisted activation flag.
    #[serde(default)]
    pub repo_is_activated: Flag,

    /// Persisted onboarding flag.
    #[serde(default)]
    pub repo_is_onboarded: Flag,
}

impl CycleReport {
    /// Returns the lifecycle flags of this repository.
    #[must_use]
    pub fn config(&self) -> RepoConfig {
        RepoConfig::new(self.repo_is_activated, self.repo_is_onboarded)
    }
}

#[derive(Debug, Deserialize)]
struct CycleFile {
    #[serde(default, rename = "repository")]
    repositories: Vec<CycleReport>,
}

/// Loads and validates a cycle report file.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if the file does not exist,
/// [`ConfigError::TomlError`] if it cannot be parsed, and
/// [`ConfigError::ValidationError`] for empty or duplicate repository names
/// and empty outcome codes.
pub fn load_cycle_reports(path: &Path) -> Result<Vec<CycleReport>, ConfigError> {
    info!(path = %path.display(), "Loading cycle reports");

    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CycleFile = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
        path: path.display().to_string(),
        source: e,
    })?;

    validate(path, &file.repositories)?;

    debug!(count = file.repositories.len(), "Loaded cycle reports");
    Ok(file.repositories)
}

fn validate(path: &Path, reports: &[CycleReport]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for report in reports {
        if report.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: "repository name cannot be empty".to_string(),
            });
        }

        if report.outcome.as_str().trim().is_empty() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: format!("outcome for '{}' cannot be empty", report.name),
            });
        }

        if !seen.insert(report.name.as_str()) {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: format!("duplicate repository '{}'", report.name),
            });
        }
    }

    Ok(())
}
