//! The classification record.

use super::ProcessStatus;
use crate::config::Flag;
use crate::outcome::OutcomeCode;
use serde::Serialize;

/// Lifecycle decision for one repository cycle.
///
/// Built once by the classifier and never mutated; `status` is fully
/// determined by the outcome and the repository configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    /// Outcome code the decision was made from.
    pub outcome: OutcomeCode,

    /// Resulting lifecycle status.
    pub status: ProcessStatus,

    /// Whether the repository is enabled, if known.
    pub enabled: Flag,

    /// Whether the repository is onboarded, if known.
    pub onboarded: Flag,
}
