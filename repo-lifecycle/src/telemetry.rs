//! Injectable tracing dispatch.
//!
//! The classifier and the command runner never reach for the process-wide
//! subscriber directly. Each holds a [`Telemetry`] handle which either forwards
//! to whatever subscriber is current at the call site, or pins every event and
//! span to an explicit [`Dispatch`].

use tracing::Dispatch;

/// Handle deciding which subscriber receives a component's events and spans.
#[derive(Debug, Clone, Default)]
pub struct Telemetry {
    dispatch: Option<Dispatch>,
}

impl Telemetry {
    /// Forwards to the subscriber that is current when the component runs.
    #[must_use]
    pub fn ambient() -> Self {
        Self { dispatch: None }
    }

    /// Routes every event and span to `dispatch`.
    #[must_use]
    pub fn with_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    /// Runs `f` with this handle's subscriber installed as the default.
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::capture::CapturedLogs;
    use super::*;

    #[test]
    fn pinned_handle_captures_events() {
        let logs = CapturedLogs::default();
        let telemetry = logs.telemetry();

        telemetry.scope(|| tracing::debug!(repo = "acme/widgets", "probe"));

        assert!(logs.contents().contains("repo=\"acme/widgets\""));
    }

    #[test]
    fn ambient_handle_runs_closure() {
        let logs = CapturedLogs::default();
        let _pinned = logs.telemetry();

        let telemetry = Telemetry::ambient();
        assert_eq!(telemetry.scope(|| 7), 7);
        telemetry.scope(|| tracing::debug!("not captured"));
        assert!(logs.contents().is_empty());
    }
}
