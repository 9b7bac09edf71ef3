//! Command runner error types.

use std::time::Duration;
use thiserror::Error;

/// Abnormal conditions reported by the command runner.
///
/// These are carried on [`ExecResult::error`](super::ExecResult::error) and
/// never returned as `Err`. A non-zero exit status or a terminating signal is
/// not an error.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The operating system could not start the process.
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the child failed.
    #[error("Failed to wait for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the input stream to the child failed.
    #[error("Failed to write stdin: {source}")]
    Stdin {
        #[source]
        source: std::io::Error,
    },

    /// Reading the child's output failed.
    #[error("Failed to capture {stream}: {message}")]
    Capture {
        stream: &'static str,
        message: String,
    },

    /// The caller-supplied timeout elapsed and the child was killed.
    #[error("Command timed out after {}ms", timeout.as_millis())]
    TimedOut { timeout: Duration },

    /// Combined output exceeded the capture limit and the child was killed.
    #[error("Output exceeded {limit} bytes")]
    MaxBufferExceeded { limit: usize },
}

impl ExecError {
    /// Returns true if the process never started.
    #[must_use]
    pub fn is_spawn(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }

    /// Returns the OS error kind for spawn and wait failures.
    #[must_use]
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Spawn { source, .. } | Self::Wait { source, .. } | Self::Stdin { source } => {
                Some(source.kind())
            }
            _ => None,
        }
    }
}
