//! Pass-through options for the command runner.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Options forwarded to the host process-spawn facility.
///
/// The output cap and text decoding are not configurable here; the runner
/// always applies [`MAX_BUFFER`](super::MAX_BUFFER) and lossy UTF-8 decoding.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    cwd: Option<PathBuf>,
    env: BTreeMap<String, String>,
    env_clear: bool,
    input: Option<Vec<u8>>,
    timeout: Option<Duration>,
    shell: bool,
}

impl ExecOptions {
    /// Creates empty options: inherit cwd and environment, no input, no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the working directory of the child.
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Adds an environment variable for the child.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Adds several environment variables for the child.
    #[must_use]
    pub fn envs<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Starts the child with an empty environment before applying [`Self::env`].
    #[must_use]
    pub fn env_clear(mut self, clear: bool) -> Self {
        self.env_clear = clear;
        self
    }

    /// Feeds `input` to the child's stdin, then closes it.
    #[must_use]
    pub fn input(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Kills the child if it runs longer than `timeout`.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Runs the command line through the platform shell.
    #[must_use]
    pub fn shell(mut self, shell: bool) -> Self {
        self.shell = shell;
        self
    }

    pub fn cwd_path(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn env_vars(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn clears_env(&self) -> bool {
        self.env_clear
    }

    pub fn input_bytes(&self) -> Option<&[u8]> {
        self.input.as_deref()
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn uses_shell(&self) -> bool {
        self.shell
    }
}
