//! Command runner result types.

use super::ExecError;
use std::process::ExitStatus;
use std::time::Duration;

/// Outcome of one external command invocation.
///
/// Abnormal conditions are data: callers inspect `status`, `signal` and
/// `error` rather than relying on control flow.
#[derive(Debug)]
pub struct ExecResult {
    /// Decoded standard output.
    pub stdout: String,

    /// Decoded standard error.
    pub stderr: String,

    /// Exit code, or `None` if the child was terminated by a signal or never ran.
    pub status: Option<i32>,

    /// Name of the terminating signal (e.g. `SIGKILL`), if any.
    pub signal: Option<String>,

    /// Spawn failure or other abnormal condition, if any.
    pub error: Option<ExecError>,

    /// Whether captured output was cut at the capture limit.
    pub truncated: bool,

    /// Whether the caller-supplied timeout elapsed.
    pub timed_out: bool,

    /// Wall-clock duration of the invocation.
    pub duration: Duration,
}

impl ExecResult {
    /// Result for a process that could not be started.
    pub(crate) fn not_started(error: ExecError, duration: Duration) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            status: None,
            signal: None,
            error: Some(error),
            truncated: false,
            timed_out: false,
            duration,
        }
    }

    /// Returns true if the child exited with status 0 and nothing went wrong.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0) && self.error.is_none()
    }

    /// Returns the spawn failure, if the process never started.
    #[must_use]
    pub fn spawn_error(&self) -> Option<&ExecError> {
        self.error.as_ref().filter(|e| e.is_spawn())
    }
}

/// Splits a host exit status into exit code and signal name.
pub(crate) fn split_status(status: ExitStatus) -> (Option<i32>, Option<String>) {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        (status.code(), status.signal().map(signal_name))
    }
    #[cfg(not(unix))]
    {
        (status.code(), None)
    }
}

/// Maps a signal number to its conventional name.
#[cfg(unix)]
pub(crate) fn signal_name(signal: i32) -> String {
    let name = match signal {
        libc::SIGHUP => "SIGHUP",
        libc::SIGINT => "SIGINT",
        libc::SIGQUIT => "SIGQUIT",
        libc::SIGILL => "SIGILL",
        libc::SIGTRAP => "SIGTRAP",
        libc::SIGABRT => "SIGABRT",
        libc::SIGBUS => "SIGBUS",
        libc::SIGFPE => "SIGFPE",
        libc::SIGKILL => "SIGKILL",
        libc::SIGUSR1 => "SIGUSR1",
        libc::SIGSEGV => "SIGSEGV",
        libc::SIGUSR2 => "SIGUSR2",
        libc::SIGPIPE => "SIGPIPE",
        libc::SIGALRM => "SIGALRM",
        libc::SIGTERM => "SIGTERM",
        libc::SIGCHLD => "SIGCHLD",
        libc::SIGCONT => "SIGCONT",
        libc::SIGSTOP => "SIGSTOP",
        libc::SIGTSTP => "SIGTSTP",
        libc::SIGXCPU => "SIGXCPU",
        libc::SIGXFSZ => "SIGXFSZ",
        _ => return format!("SIG{signal}"),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn names_common_signals() {
        assert_eq!(signal_name(libc::SIGKILL), "SIGKILL");
        assert_eq!(signal_name(libc::SIGTERM), "SIGTERM");
        assert_eq!(signal_name(libc::SIGPIPE), "SIGPIPE");
        assert_eq!(signal_name(250), "SIG250");
    }

    #[test]
    fn not_started_has_no_status() {
        let result = ExecResult::not_started(
            ExecError::Spawn {
                command: "missing".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
            Duration::ZERO,
        );

        assert!(!result.success());
        assert!(result.spawn_error().is_some());
        assert_eq!(result.status, None);
        assert_eq!(result.signal, None);
        assert!(result.stdout.is_empty());
    }
}
