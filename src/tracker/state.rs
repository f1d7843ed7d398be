use crate::core::errors::StatusError;
use crate::core::models::{FieldValue, TaskState, TaskStatus};
use crate::tracker::sink::RenderSink;
use std::time::Duration;

/// Text placed in the status slot when a status check fails.
pub const ERROR_SENTINEL: &str = "ERROR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Polling,
    Done(TaskState),
    Errored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The backend reported a terminal state. Task-level failure lands here
    /// too: the poll itself succeeded.
    Completed { state: TaskState, polls: u32 },
    /// A status check failed and tracking stopped.
    Errored { polls: u32 },
}

impl TrackOutcome {
    pub fn polls(&self) -> u32 {
        match self {
            TrackOutcome::Completed { polls, .. } | TrackOutcome::Errored { polls } => *polls,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TrackOutcome::Errored { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Reschedule(Duration),
    Stop(TrackOutcome),
}

/// Poll bookkeeping for one status address.
#[derive(Debug)]
pub struct PollState {
    address: String,
    phase: Phase,
    polls: u32,
    interval: Duration,
}

impl PollState {
    pub fn new(address: impl Into<String>, interval: Duration) -> Self {
        Self {
            address: address.into(),
            phase: Phase::Polling,
            polls: 0,
            interval,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    #[cfg(test)]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn polls(&self) -> u32 {
        self.polls
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Polling
    }

    pub fn outcome(&self) -> Option<TrackOutcome> {
        match &self.phase {
            Phase::Polling => None,
            Phase::Done(state) => Some(TrackOutcome::Completed {
                state: state.clone(),
                polls: self.polls,
            }),
            Phase::Errored => Some(TrackOutcome::Errored { polls: self.polls }),
        }
    }

    /// Folds the result of one status check into the state, renders it, and
    /// says what the loop does next. `Done` and `Errored` absorb further
    /// results without rendering.
    pub fn apply(
        &mut self,
        result: Result<TaskStatus, StatusError>,
        sink: &dyn RenderSink,
    ) -> Step {
        if let Some(outcome) = self.outcome() {
            return Step::Stop(outcome);
        }

        self.polls = self.polls.saturating_add(1);

        match result {
            Ok(status) if status.is_terminal() => {
                sink.render_status(status.state.label());
                sink.render_total_records(field_text(&status.total_records));
                sink.render_start_time(field_text(&status.start_time));
                sink.render_end_time(field_text(&status.end_time));
                sink.lock_controls();

                tracing::info!(
                    address = %self.address,
                    state = %status.state,
                    polls = self.polls,
                    "Task reached terminal state"
                );
                self.phase = Phase::Done(status.state.clone());
                Step::Stop(TrackOutcome::Completed {
                    state: status.state,
                    polls: self.polls,
                })
            }
            Ok(status) => {
                sink.render_status(status.state.label());

                tracing::debug!(
                    address = %self.address,
                    state = %status.state,
                    delay_ms = self.interval.as_millis() as u64,
                    "Task still running, rescheduling"
                );
                Step::Reschedule(self.interval)
            }
            Err(e) => {
                sink.render_status(ERROR_SENTINEL);
                sink.lock_controls();

                tracing::warn!(
                    address = %self.address,
                    kind = e.kind(),
                    error = %e,
                    polls = self.polls,
                    "Status check failed, tracking stopped"
                );
                self.phase = Phase::Errored;
                Step::Stop(TrackOutcome::Errored { polls: self.polls })
            }
        }
    }
}

fn field_text(value: &Option<FieldValue>) -> &str {
    value.as_ref().map(FieldValue::as_str).unwrap_or_default()
}
