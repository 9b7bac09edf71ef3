//! CLI for repo-lifecycle.
//!
//! Classifies repository cycle outcomes into lifecycle states and runs
//! external tools through the bounded command runner.

use clap::{Parser, Subcommand};
use repo_lifecycle::{
    load_cycle_reports, Classifier, CommandRunner, ConfigError, CycleResult, ExecOptions,
    ExecResult, Flag, OutcomeCode, OutcomeGroup, ProcessResult, ProcessStatus, RepoConfig,
    RunSummary,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// repo-lifecycle - Classify repository cycle outcomes and run external tools.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a single cycle outcome.
    Classify {
        /// Outcome code reported by the cycle.
        #[arg(long)]
        outcome: String,

        /// Repository configuration file (TOML) providing both flags.
        #[arg(long, conflicts_with_all = ["activated", "onboarded"])]
        config: Option<PathBuf>,

        /// Whether the repository is activated. Omit to leave unset.
        #[arg(long)]
        activated: Option<bool>,

        /// Whether the repository is onboarded. Omit to leave unset.
        #[arg(long)]
        onboarded: Option<bool>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Classify every repository in a cycle report file and summarize.
    Summarize {
        /// Path to the cycle report file.
        #[arg(long, env = "REPO_LIFECYCLE_CYCLES", default_value = "cycles.toml")]
        cycles: PathBuf,

        /// Print results and summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run an external command and forward its output.
    Exec {
        /// Working directory for the command.
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Extra environment variable for the command, as KEY=VALUE. Repeatable.
        #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_var)]
        env: Vec<(String, String)>,

        /// Kill the command after this many seconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Run the command line through the platform shell.
        #[arg(long)]
        shell: bool,

        /// Command to run.
        program: String,

        /// Arguments passed to the command.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// Errors that abort the CLI.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Configuration or cycle report loading errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON rendering errors.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The blocking worker running a command failed.
    #[error("Command worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    /// Forwarding command output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON document printed by `summarize --json`.
#[derive(Serialize)]
struct SummaryReport<'a> {
    results: &'a [CycleResult],
    summary: &'a RunSummary,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Uses compact single-line output without module targets, filtered through
/// `RUST_LOG` (defaults to "info"). Logs go to stderr so that `exec` can
/// forward the child's stdout untouched.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<ExitCode, CliError> {
    match args.command {
        Command::Classify {
            outcome,
            config,
            activated,
            onboarded,
            json,
        } => {
            let config = match config {
                Some(path) => RepoConfig::load(&path)?,
                None => RepoConfig::new(Flag::from(activated), Flag::from(onboarded)),
            };
            let result = Classifier::default().classify(&config, &OutcomeCode::from(outcome));

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(None, &result);
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Summarize { cycles, json } => {
            let reports = load_cycle_reports(&cycles)?;
            let results = Classifier::default().classify_reports(&reports);
            let mut summary = RunSummary::new();
            summary.record_all(&results);

            if json {
                let report = SummaryReport {
                    results: &results,
                    summary: &summary,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for cycle in &results {
                    print_result(Some(&cycle.repository), &cycle.result);
                }
                print_summary(&summary);
            }

            if summary.has_failures() {
                Ok(ExitCode::from(1))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }

        Command::Exec {
            cwd,
            env,
            timeout,
            shell,
            program,
            args,
        } => {
            let mut options = ExecOptions::new().shell(shell).envs(env);
            if let Some(cwd) = cwd {
                options = options.cwd(cwd);
            }
            if let Some(secs) = timeout {
                options = options.timeout(Duration::from_secs(secs));
            }

            // The runner blocks for the lifetime of the child.
            let runner = CommandRunner::default();
            let result = tokio::task::spawn_blocking(move || {
                runner.exec(&program, args.as_slice(), &options)
            })
            .await?;

            forward_output(&result)?;
            Ok(exit_code_for(&result))
        }
    }
}

/// Parses a `KEY=VALUE` environment assignment.
fn parse_env_var(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

/// Prints one classification.
fn print_result(repository: Option<&str>, result: &ProcessResult) {
    let prefix = repository.map(|r| format!("{r}: ")).unwrap_or_default();
    println!(
        "{prefix}{} -> {} (enabled: {}, onboarded: {})",
        result.outcome, result.status, result.enabled, result.onboarded
    );
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Repositories: {}", summary.repositories);
    for status in ProcessStatus::ALL {
        println!("  {}: {}", status, summary.count(status));
    }
    for group in OutcomeGroup::ALL.into_iter().filter(|g| g.is_failure()) {
        let count = summary.group_count(group);
        if count > 0 {
            println!("  {group} outcomes: {count}");
        }
    }
    if !summary.unrecognized.is_empty() {
        println!("  Unrecognized outcomes: {}", summary.unrecognized.join(", "));
    }
}

/// Writes the captured output of a command to our own stdout and stderr.
fn forward_output(result: &ExecResult) -> std::io::Result<()> {
    std::io::stdout().write_all(result.stdout.as_bytes())?;
    std::io::stderr().write_all(result.stderr.as_bytes())?;
    Ok(())
}

/// Maps a command result onto the CLI exit code.
fn exit_code_for(result: &ExecResult) -> ExitCode {
    if let Some(e) = result.spawn_error() {
        error!(error = %e, "Command could not be started");
        return ExitCode::from(2);
    }
    if let Some(e) = &result.error {
        warn!(error = %e, "Command did not complete normally");
        return ExitCode::from(1);
    }
    match result.status {
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        None => {
            warn!(signal = ?result.signal, "Command was terminated by a signal");
            ExitCode::from(1)
        }
    }
}
