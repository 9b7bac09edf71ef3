use std::path::PathBuf;

use repo_lifecycle::{
    load_cycle_reports, Classifier, ConfigError, OutcomeGroup, ProcessStatus, RunSummary,
};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cycles")
}

#[test]
fn load_reports_from_fixture() {
    let reports = load_cycle_reports(&fixtures_root().join("nightly.toml")).unwrap();

    assert_eq!(reports.len(), 5);
    assert_eq!(reports[0].name, "acme/widgets");
    assert_eq!(reports[4].outcome.as_str(), "quota-melted");
}

#[test]
fn load_reports_rejects_duplicate_fixture() {
    let result = load_cycle_reports(&fixtures_root().join("duplicates.toml"));

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn summarize_fixture() {
    let reports = load_cycle_reports(&fixtures_root().join("nightly.toml")).unwrap();
    let results = Classifier::default().classify_reports(&reports);

    let mut summary = RunSummary::new();
    summary.record_all(&results);

    assert_eq!(summary.repositories, 5);
    assert_eq!(summary.count(ProcessStatus::Activated), 1);
    assert_eq!(summary.count(ProcessStatus::Disabled), 1);
    assert_eq!(summary.count(ProcessStatus::Onboarded), 1);
    assert_eq!(summary.count(ProcessStatus::Onboarding), 1);
    assert_eq!(summary.count(ProcessStatus::Unknown), 1);
    assert_eq!(summary.group_count(OutcomeGroup::ConfigError), 1);
    assert_eq!(summary.unrecognized, vec!["quota-melted".to_string()]);
    assert!(summary.has_failures());
}
