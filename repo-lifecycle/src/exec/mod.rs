//! Synchronous execution of external tools.
//!
//! [`CommandRunner::exec`] blocks the calling thread until the child exits or
//! fails to start, so it must run on a worker dedicated to one unit of work
//! (for example inside `tokio::task::spawn_blocking`), never on a thread
//! shared between repository cycles.
//!
//! Output is always decoded as text and the combined size of stdout and
//! stderr is capped at [`MAX_BUFFER`]. Neither can be changed by the caller.
//! Non-zero exits, signals, timeouts and spawn failures are all reported on
//! the returned [`ExecResult`]; nothing is raised.

mod capture;
mod error;
mod options;
mod output;

pub use error::ExecError;
pub use options::ExecOptions;
pub use output::ExecResult;

use crate::telemetry::Telemetry;
use capture::{read_limited, OutputBudget};
use output::split_status;
use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, field, info_span, warn};
use wait_timeout::ChildExt;

/// Combined stdout and stderr capture limit in bytes.
pub const MAX_BUFFER: usize = 20 * 1024 * 1024;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs external commands inside an instrumentation span.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    telemetry: Telemetry,
}

impl CommandRunner {
    /// Creates a runner that reports spans and events through `telemetry`.
    #[must_use]
    pub fn new(telemetry: Telemetry) -> Self {
        Self { telemetry }
    }

    /// Runs `command` with `args` and waits for it to finish.
    ///
    /// The span `exec` carries the full command line and records the
    /// wall-clock duration in `duration_ms` before it closes.
    pub fn exec<S: AsRef<str>>(
        &self,
        command: &str,
        args: &[S],
        options: &ExecOptions,
    ) -> ExecResult {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let command_line = describe(command, &args);

        self.telemetry.scope(|| {
            let span = info_span!("exec", command = %command_line, duration_ms = field::Empty);
            let _entered = span.enter();

            let result = run(command, &args, options);

            let duration_ms = u64::try_from(result.duration.as_millis()).unwrap_or(u64::MAX);
            span.record("duration_ms", duration_ms);
            debug!(
                status = ?result.status,
                signal = ?result.signal,
                truncated = result.truncated,
                timed_out = result.timed_out,
                "Command finished"
            );
            result
        })
    }

    /// Runs `command` without arguments and with default options.
    pub fn run(&self, command: &str) -> ExecResult {
        self.exec::<&str>(command, &[], &ExecOptions::default())
    }
}

/// Runs `command` with `args`, reporting to the current subscriber.
pub fn exec<S: AsRef<str>>(command: &str, args: &[S], options: &ExecOptions) -> ExecResult {
    CommandRunner::default().exec(command, args, options)
}

enum Termination {
    Exited,
    TimedOut(Duration),
    Overflow,
}

fn run(command: &str, args: &[String], options: &ExecOptions) -> ExecResult {
    let started = Instant::now();
    let mut cmd = build_command(command, args, options);

    debug!("Spawning child process");
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(source) => {
            error!(error = %source, "Failed to spawn command");
            return ExecResult::not_started(
                ExecError::Spawn {
                    command: command.to_string(),
                    source,
                },
                started.elapsed(),
            );
        }
    };

    let budget = Arc::new(OutputBudget::new(MAX_BUFFER));
    let stdin_writer = match (child.stdin.take(), options.input_bytes()) {
        (Some(stdin), Some(input)) => {
            let input = input.to_vec();
            Some(thread::spawn(move || feed_stdin(stdin, &input)))
        }
        _ => None,
    };
    let stdout_reader = child
        .stdout
        .take()
        .map(|stream| spawn_reader(stream, Arc::clone(&budget)));
    let stderr_reader = child
        .stderr
        .take()
        .map(|stream| spawn_reader(stream, Arc::clone(&budget)));

    let mut errors = Vec::new();
    let (status, signal, termination) =
        match wait_for_exit(&mut child, &budget, options.timeout_duration(), started) {
            Ok((exit, termination)) => {
                let (status, signal) = split_status(exit);
                (status, signal, termination)
            }
            Err(source) => {
                error!(error = %source, "Failed to wait for command");
                // Best effort: the readers only finish once the child is gone.
                let _ = kill_and_reap(&mut child);
                errors.push(ExecError::Wait {
                    command: command.to_string(),
                    source,
                });
                (None, None, Termination::Exited)
            }
        };

    let stdout = join_reader(stdout_reader, "stdout", &mut errors);
    let stderr = join_reader(stderr_reader, "stderr", &mut errors);
    if let Some(writer) = stdin_writer {
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(source)) => errors.push(ExecError::Stdin { source }),
            Err(_) => errors.push(ExecError::Capture {
                stream: "stdin",
                message: "writer thread panicked".to_string(),
            }),
        }
    }

    let truncated = budget.exceeded();
    let timed_out = matches!(termination, Termination::TimedOut(_));
    match termination {
        Termination::TimedOut(timeout) => errors.insert(0, ExecError::TimedOut { timeout }),
        Termination::Overflow => errors.insert(
            0,
            ExecError::MaxBufferExceeded {
                limit: budget.limit(),
            },
        ),
        Termination::Exited if truncated => errors.insert(
            0,
            ExecError::MaxBufferExceeded {
                limit: budget.limit(),
            },
        ),
        Termination::Exited => {}
    }
    if truncated {
        warn!(limit = budget.limit(), "Output truncated");
    }

    ExecResult {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        status,
        signal,
        error: errors.into_iter().next(),
        truncated,
        timed_out,
        duration: started.elapsed(),
    }
}

fn build_command(command: &str, args: &[String], options: &ExecOptions) -> Command {
    let mut cmd = if options.uses_shell() {
        shell_command(&describe(command, args))
    } else {
        let mut cmd = Command::new(command);
        cmd.args(args);
        cmd
    };

    if let Some(cwd) = options.cwd_path() {
        cmd.current_dir(cwd);
    }
    if options.clears_env() {
        cmd.env_clear();
    }
    cmd.envs(options.env_vars());

    if options.input_bytes().is_some() {
        cmd.stdin(Stdio::piped());
    } else {
        cmd.stdin(Stdio::null());
    }
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    // Descendants share the child's pipes and must be killed with it.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }
    cmd
}

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("/bin/sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

#[cfg(not(unix))]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/d", "/s", "/c"]).arg(command_line);
    cmd
}

fn describe(command: &str, args: &[String]) -> String {
    std::iter::once(command)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn spawn_reader<R>(stream: R, budget: Arc<OutputBudget>) -> JoinHandle<io::Result<Vec<u8>>>
where
    R: io::Read + Send + 'static,
{
    thread::spawn(move || read_limited(stream, &budget))
}

fn join_reader(
    handle: Option<JoinHandle<io::Result<Vec<u8>>>>,
    stream: &'static str,
    errors: &mut Vec<ExecError>,
) -> Vec<u8> {
    let Some(handle) = handle else {
        return Vec::new();
    };

    match handle.join() {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            errors.push(ExecError::Capture {
                stream,
                message: e.to_string(),
            });
            Vec::new()
        }
        Err(_) => {
            errors.push(ExecError::Capture {
                stream,
                message: "reader thread panicked".to_string(),
            });
            Vec::new()
        }
    }
}

fn feed_stdin(mut stdin: ChildStdin, input: &[u8]) -> io::Result<()> {
    match stdin.write_all(input) {
        // The child may exit without reading everything.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn wait_for_exit(
    child: &mut Child,
    budget: &OutputBudget,
    timeout: Option<Duration>,
    started: Instant,
) -> io::Result<(ExitStatus, Termination)> {
    loop {
        if budget.exceeded() {
            warn!(limit = budget.limit(), "Output limit exceeded, killing command");
            return kill_and_reap(child).map(|status| (status, Termination::Overflow));
        }

        let slice = match timeout {
            Some(timeout) => {
                let remaining = timeout.saturating_sub(started.elapsed());
                if remaining.is_zero() {
                    warn!(
                        timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                        "Command timed out, killing"
                    );
                    return kill_and_reap(child)
                        .map(|status| (status, Termination::TimedOut(timeout)));
                }
                remaining.min(POLL_INTERVAL)
            }
            None => POLL_INTERVAL,
        };

        if let Some(status) = child.wait_timeout(slice)? {
            return Ok((status, Termination::Exited));
        }
    }
}

/// Kills the child together with everything it started, then reaps it.
///
/// The output readers only reach EOF once every holder of the pipes is gone.
fn kill_and_reap(child: &mut Child) -> io::Result<ExitStatus> {
    #[cfg(unix)]
    if kill_process_group(child.id()) {
        return child.wait();
    }

    match child.kill() {
        Ok(()) => {}
        // Already reaped.
        Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
        Err(e) => return Err(e),
    }
    child.wait()
}

/// Sends `SIGKILL` to the process group led by `pid`.
///
/// Returns `false` when the group could not be signalled, in which case the
/// caller falls back to killing the child directly.
#[cfg(unix)]
#[allow(unsafe_code)]
fn kill_process_group(pid: u32) -> bool {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return false;
    };
    if pgid <= 0 {
        return false;
    }

    // SAFETY: `kill(2)` touches no memory. `pgid` is positive, so the
    // negated value addresses exactly the group created for this child by
    // `process_group(0)` and never every process (-1).
    let ret = unsafe { libc::kill(-pgid, libc::SIGKILL) };
    if ret == 0 {
        return true;
    }

    let err = io::Error::last_os_error();
    debug!(error = %err, pgid, "Failed to kill process group");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::capture::CapturedLogs;

    #[test]
    fn describes_command_line() {
        let args = vec!["status".to_string(), "--porcelain".to_string()];
        assert_eq!(describe("git", &args), "git status --porcelain");
        assert_eq!(describe("ls", &[]), "ls");
    }

    #[test]
    fn span_closes_on_spawn_failure() {
        let logs = CapturedLogs::default();
        let runner = CommandRunner::new(logs.telemetry());

        let result = runner.exec(
            "repo-lifecycle-missing-binary",
            &["--flag"],
            &ExecOptions::default(),
        );

        assert!(result.spawn_error().is_some());
        let output = logs.contents();
        assert!(
            output.contains("command=repo-lifecycle-missing-binary --flag"),
            "{output}"
        );
        assert!(output.contains("Failed to spawn command"), "{output}");
        assert!(output.contains("duration_ms="), "{output}");
    }

    #[cfg(unix)]
    #[test]
    fn span_records_duration_on_success() {
        let logs = CapturedLogs::default();
        let runner = CommandRunner::new(logs.telemetry());

        let result = runner.exec("sh", &["-c", "exit 0"], &ExecOptions::default());

        assert!(result.success());
        let output = logs.contents();
        assert!(output.contains("exec{command=sh -c exit 0"), "{output}");
        assert!(output.contains("Command finished"), "{output}");
        assert!(output.contains("duration_ms="), "{output}");
    }

    #[cfg(unix)]
    #[test]
    fn group_kill_ignores_non_positive_ids() {
        assert!(!kill_process_group(0));
        assert!(!kill_process_group(u32::MAX));
    }
}
