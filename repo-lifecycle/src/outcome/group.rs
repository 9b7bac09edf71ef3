//! Semantic grouping of outcome codes.

use serde::Serialize;
use std::fmt;

/// Semantic group an [`OutcomeCode`](super::OutcomeCode) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeGroup {
    /// The cycle completed.
    Success,

    /// The repository must be treated as disabled.
    RepositoryDisabled,

    /// A transient condition; the next cycle may succeed.
    Temporary,

    /// The repository configuration is broken or incomplete.
    ConfigError,

    /// The host running the cycle ran out of resources.
    SystemError,

    /// An external host or the hosting platform rejected a request.
    PlatformError,

    /// Any other known failure.
    Other,

    /// The code is not part of the known set.
    Unrecognized,
}

impl OutcomeGroup {
    /// Every group, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Success,
        Self::RepositoryDisabled,
        Self::Temporary,
        Self::ConfigError,
        Self::SystemError,
        Self::PlatformError,
        Self::Other,
        Self::Unrecognized,
    ];

    /// Returns the group name as used in logs and summaries.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::RepositoryDisabled => "repository-disabled",
            Self::Temporary => "temporary",
            Self::ConfigError => "config-error",
            Self::SystemError => "system-error",
            Self::PlatformError => "platform-error",
            Self::Other => "other",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Returns true for groups that signal a failure needing operator attention.
    ///
    /// Disabled and temporary outcomes are expected states of a repository, not
    /// failures of the run.
    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Self::ConfigError
                | Self::SystemError
                | Self::PlatformError
                | Self::Other
                | Self::Unrecognized
        )
    }
}

impl fmt::Display for OutcomeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
