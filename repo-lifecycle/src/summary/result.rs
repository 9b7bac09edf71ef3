//! Per-repository cycle results.

use crate::result::ProcessResult;
use serde::Serialize;

/// Classification of one repository's cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleResult {
    /// Repository full name.
    pub repository: String,

    /// Lifecycle decision for the repository.
    #[serde(flatten)]
    pub result: ProcessResult,
}
