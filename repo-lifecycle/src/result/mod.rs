//! Classification of cycle outcomes into lifecycle states.
//!
//! [`Classifier::classify`] is a total function of the repository
//! configuration and the outcome code. The rules are evaluated in a fixed
//! order and the first match wins:
//!
//! 1. Repository-disabled outcomes yield [`ProcessStatus::Disabled`], whatever
//!    the configuration says.
//! 2. An activated repository yields [`ProcessStatus::Activated`].
//! 3. Configuration-error outcomes, or an onboarded repository, yield
//!    [`ProcessStatus::Onboarded`], so operators still hear about broken config
//!    on repositories that never finished onboarding.
//! 4. A repository explicitly not onboarded yields
//!    [`ProcessStatus::Onboarding`].
//! 5. Anything else, including unrecognized outcome codes, yields
//!    [`ProcessStatus::Unknown`].

mod process_result;
mod status;

pub use process_result::ProcessResult;
pub use status::ProcessStatus;

use crate::config::{CycleReport, Flag, RepoConfig};
use crate::outcome::{OutcomeCode, OutcomeGroup};
use crate::summary::CycleResult;
use crate::telemetry::Telemetry;
use tracing::debug;

/// Turns cycle outcomes into [`ProcessResult`]s and logs each decision.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    telemetry: Telemetry,
}

impl Classifier {
    /// Creates a classifier that logs through `telemetry`.
    #[must_use]
    pub fn new(telemetry: Telemetry) -> Self {
        Self { telemetry }
    }

    /// Classifies one cycle outcome.
    ///
    /// Emits one debug event carrying the outcome, status and both flags;
    /// unset flags render as [`UNSET_MARKER`](crate::config::UNSET_MARKER).
    #[must_use]
    pub fn classify(&self, config: &RepoConfig, outcome: &OutcomeCode) -> ProcessResult {
        let (status, enabled, onboarded) = decide(config, outcome);

        self.telemetry.scope(|| {
            if status == ProcessStatus::Unknown {
                debug!(res = %outcome, "Unknown res");
            }
            debug!(
                res = %outcome,
                status = %status,
                enabled = %enabled,
                onboarded = %onboarded,
                "Repository result"
            );
        });

        ProcessResult {
            outcome: outcome.clone(),
            status,
            enabled,
            onboarded,
        }
    }

    /// Classifies every report, keeping the input order.
    #[must_use]
    pub fn classify_reports(&self, reports: &[CycleReport]) -> Vec<CycleResult> {
        reports
            .iter()
            .map(|report| CycleResult {
                repository: report.name.clone(),
                result: self.classify(&report.config(), &report.outcome),
            })
            .collect()
    }
}

/// Classifies one cycle outcome, logging to the current subscriber.
#[must_use]
pub fn process_result(config: &RepoConfig, outcome: &OutcomeCode) -> ProcessResult {
    Classifier::default().classify(config, outcome)
}

fn decide(config: &RepoConfig, outcome: &OutcomeCode) -> (ProcessStatus, Flag, Flag) {
    let group = outcome.group();

    if group == OutcomeGroup::RepositoryDisabled {
        (ProcessStatus::Disabled, Flag::False, Flag::Unset)
    } else if config.activated.is_true() {
        (ProcessStatus::Activated, Flag::True, Flag::True)
    } else if group == OutcomeGroup::ConfigError || config.onboarded.is_true() {
        (ProcessStatus::Onboarded, Flag::True, Flag::True)
    } else if config.onboarded.is_false() {
        (ProcessStatus::Onboarding, Flag::True, Flag::False)
    } else {
        (ProcessStatus::Unknown, Flag::Unset, Flag::Unset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::capture::CapturedLogs;

    fn classify(activated: Flag, onboarded: Flag, outcome: &str) -> ProcessResult {
        process_result(
            &RepoConfig::new(activated, onboarded),
            &OutcomeCode::parse(outcome),
        )
    }

    #[test]
    fn disabled_precedes_activated() {
        let result = classify(Flag::True, Flag::Unset, "archived");
        assert_eq!(result.status, ProcessStatus::Disabled);
        assert_eq!(result.enabled, Flag::False);
        assert_eq!(result.onboarded, Flag::Unset);
    }

    #[test]
    fn activated_repository() {
        let result = classify(Flag::True, Flag::Unset, "done");
        assert_eq!(result.status, ProcessStatus::Activated);
        assert_eq!(result.enabled, Flag::True);
        assert_eq!(result.onboarded, Flag::True);
    }

    #[test]
    fn activated_precedes_config_error() {
        let result = classify(Flag::True, Flag::False, "config-validation");
        assert_eq!(result.status, ProcessStatus::Activated);
    }

    #[test]
    fn config_error_counts_as_onboarded() {
        let result = classify(Flag::False, Flag::Unset, "config-validation");
        assert_eq!(result.status, ProcessStatus::Onboarded);
        assert_eq!(result.enabled, Flag::True);
        assert_eq!(result.onboarded, Flag::True);
    }

    #[test]
    fn config_error_overrides_explicit_not_onboarded() {
        let result = classify(Flag::Unset, Flag::False, "missing-api-credentials");
        assert_eq!(result.status, ProcessStatus::Onboarded);
    }

    #[test]
    fn onboarding_requires_explicit_false() {
        let result = classify(Flag::False, Flag::False, "done");
        assert_eq!(result.status, ProcessStatus::Onboarding);
        assert_eq!(result.enabled, Flag::True);
        assert_eq!(result.onboarded, Flag::False);
    }

    #[test]
    fn unset_onboarding_is_unknown() {
        let result = classify(Flag::False, Flag::Unset, "done");
        assert_eq!(result.status, ProcessStatus::Unknown);
        assert_eq!(result.enabled, Flag::Unset);
        assert_eq!(result.onboarded, Flag::Unset);
    }

    #[test]
    fn keeps_outcome_on_result() {
        let result = classify(Flag::Unset, Flag::True, "automerged");
        assert_eq!(result.outcome, OutcomeCode::Automerged);
        assert_eq!(result.status, ProcessStatus::Onboarded);
    }

    #[test]
    fn logs_unset_marker_for_unknown() {
        let logs = CapturedLogs::default();
        let classifier = Classifier::new(logs.telemetry());

        classifier.classify(
            &RepoConfig::new(Flag::False, Flag::Unset),
            &OutcomeCode::Done,
        );

        let output = logs.contents();
        assert!(output.contains("Unknown res"), "{output}");
        assert!(output.contains("Repository result"), "{output}");
        assert!(output.contains("res=done"), "{output}");
        assert!(output.contains("status=unknown"), "{output}");
        assert!(output.contains("enabled=undefined"), "{output}");
        assert!(output.contains("onboarded=undefined"), "{output}");
    }

    #[test]
    fn logs_one_line_for_known_status() {
        let logs = CapturedLogs::default();
        let classifier = Classifier::new(logs.telemetry());

        classifier.classify(
            &RepoConfig::new(Flag::True, Flag::Unset),
            &OutcomeCode::Archived,
        );

        let output = logs.contents();
        assert_eq!(output.lines().count(), 1, "{output}");
        assert!(output.contains("res=archived status=disabled enabled=false onboarded=undefined"));
    }

    #[test]
    fn classifies_reports_in_order() {
        let reports = vec![
            CycleReport {
                name: "acme/a".to_string(),
                outcome: OutcomeCode::Done,
                repo_is_activated: Flag::True,
                repo_is_onboarded: Flag::Unset,
            },
            CycleReport {
                name: "acme/b".to_string(),
                outcome: OutcomeCode::Blocked,
                repo_is_activated: Flag::True,
                repo_is_onboarded: Flag::True,
            },
        ];

        let results = Classifier::default().classify_reports(&reports);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].repository, "acme/a");
        assert_eq!(results[0].result.status, ProcessStatus::Activated);
        assert_eq!(results[1].repository, "acme/b");
        assert_eq!(results[1].result.status, ProcessStatus::Disabled);
    }
}
