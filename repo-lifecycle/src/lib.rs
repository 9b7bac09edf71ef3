#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod exec;
pub mod outcome;
pub mod result;
pub mod summary;
pub mod telemetry;

pub use config::{load_cycle_reports, ConfigError, CycleReport, Flag, RepoConfig, UNSET_MARKER};
pub use exec::{exec, CommandRunner, ExecError, ExecOptions, ExecResult, MAX_BUFFER};
pub use outcome::{OutcomeCode, OutcomeGroup};
pub use result::{process_result, Classifier, ProcessResult, ProcessStatus};
pub use summary::{CycleResult, RunSummary};
pub use telemetry::Telemetry;
