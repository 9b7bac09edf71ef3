//! Process status types.

use serde::Serialize;
use std::fmt;

/// Lifecycle state of a repository after one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    /// The repository must not be processed further.
    Disabled,

    /// The repository is activated.
    Activated,

    /// The repository has completed onboarding.
    Onboarded,

    /// The repository was offered onboarding and has not accepted yet.
    Onboarding,

    /// Nothing conclusive is known; callers must not act destructively.
    Unknown,
}

impl ProcessStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Disabled,
        Self::Activated,
        Self::Onboarded,
        Self::Onboarding,
        Self::Unknown,
    ];

    /// Returns the status as a string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Activated => "activated",
            Self::Onboarded => "onboarded",
            Self::Onboarding => "onboarding",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
