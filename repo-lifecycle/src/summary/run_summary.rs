//! Run summary types.

use super::result::CycleResult;
use crate::outcome::OutcomeGroup;
use crate::result::{ProcessResult, ProcessStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary of the lifecycle decisions made during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of repositories classified.
    pub repositories: usize,

    /// Number of repositories per resulting status.
    pub statuses: BTreeMap<ProcessStatus, usize>,

    /// Number of repositories per outcome group.
    pub groups: BTreeMap<OutcomeGroup, usize>,

    /// Outcome codes that were not part of the known set.
    pub unrecognized: Vec<String>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the summary with a classification.
    pub fn record_result(&mut self, result: &ProcessResult) {
        self.repositories += 1;
        *self.statuses.entry(result.status).or_default() += 1;
        *self.groups.entry(result.outcome.group()).or_default() += 1;
        if result.outcome.is_unrecognized() {
            self.unrecognized.push(result.outcome.to_string());
        }
    }

    /// Updates the summary with every cycle result in `results`.
    pub fn record_all<'a>(&mut self, results: impl IntoIterator<Item = &'a CycleResult>) {
        for cycle in results {
            self.record_result(&cycle.result);
        }
    }

    /// Returns how many repositories ended with `status`.
    #[must_use]
    pub fn count(&self, status: ProcessStatus) -> usize {
        self.statuses.get(&status).copied().unwrap_or(0)
    }

    /// Returns how many outcomes fell into `group`.
    #[must_use]
    pub fn group_count(&self, group: OutcomeGroup) -> usize {
        self.groups.get(&group).copied().unwrap_or(0)
    }

    /// Returns true if any outcome needs operator attention.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.groups
            .iter()
            .any(|(group, count)| group.is_failure() && *count > 0)
    }

    /// Returns true if no outcome needs operator attention.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }
}
