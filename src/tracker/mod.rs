mod sink;
mod state;
mod timer;

#[cfg(test)]
pub(crate) mod testing;

use crate::source::StatusSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};

pub use sink::{ConsoleSink, RenderSink};
use state::{PollState, Step};

pub use state::TrackOutcome;
pub use timer::{Timer, TokioTimer};

pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Polls one status address until the task it names reaches a terminal
/// state or a status check fails.
#[derive(Clone)]
pub struct ProgressTracker {
    source: Arc<dyn StatusSource>,
    sink: Arc<dyn RenderSink>,
    timer: Arc<dyn Timer>,
    poll_interval: Duration,
}

impl ProgressTracker {
    pub fn new(
        source: Arc<dyn StatusSource>,
        sink: Arc<dyn RenderSink>,
        timer: Arc<dyn Timer>,
    ) -> Self {
        Self {
            source,
            sink,
            timer,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Runs the poll cycle to completion on the current task. The next
    /// request is only issued after the previous one resolved and the timer
    /// fired, so at most one request is ever outstanding.
    pub async fn track(&self, address: impl Into<String>) -> TrackOutcome {
        let mut state = PollState::new(address, self.poll_interval);

        loop {
            tracing::debug!(
                address = %state.address(),
                poll = state.polls() + 1,
                "Getting task status"
            );

            let result = self.source.fetch_status(state.address()).await;

            match state.apply(result, self.sink.as_ref()) {
                Step::Reschedule(delay) => self.timer.sleep(delay).await,
                Step::Stop(outcome) => return outcome,
            }
        }
    }

    /// Spawns the poll cycle onto the runtime.
    pub fn start_tracking(self, address: impl Into<String>) -> TrackerHandle {
        let address = address.into();
        tracing::info!(%address, "Tracking task progress");

        let task_address = address.clone();
        let handle = tokio::spawn(async move { self.track(task_address).await });

        TrackerHandle { address, handle }
    }
}

pub struct TrackerHandle {
    address: String,
    handle: JoinHandle<TrackOutcome>,
}

impl TrackerHandle {
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Drops any pending request or timer. Nothing further is rendered.
    pub fn cancel(&self) {
        tracing::debug!(address = %self.address, "Cancelling tracker");
        self.handle.abort();
    }

    /// Resolves once the tracker stops. Cancelled trackers yield a
    /// cancelled `JoinError`.
    pub async fn wait(&mut self) -> Result<TrackOutcome, JoinError> {
        (&mut self.handle).await
    }
}
