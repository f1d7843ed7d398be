//! Scripted collaborators for tracker tests.

use crate::core::errors::StatusError;
use crate::core::models::{FieldValue, TaskState, TaskStatus};
use crate::source::StatusSource;
use crate::tracker::sink::RenderSink;
use crate::tracker::timer::Timer;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn status(label: &str) -> TaskStatus {
    TaskStatus::new(TaskState::from_label(label))
}

pub fn terminal(label: &str, total: &str, start: &str, end: &str) -> TaskStatus {
    TaskStatus {
        state: TaskState::from_label(label),
        total_records: Some(FieldValue::new(total)),
        start_time: Some(FieldValue::new(start)),
        end_time: Some(FieldValue::new(end)),
    }
}

pub fn http_error(address: &str) -> StatusError {
    StatusError::Http {
        address: address.to_string(),
        status: reqwest::StatusCode::BAD_GATEWAY,
    }
}

pub fn payload_error(address: &str) -> StatusError {
    StatusError::Payload {
        address: address.to_string(),
        source: serde_json::from_str::<TaskStatus>("<html>").unwrap_err(),
    }
}

/// Replays queued results, then reports `PENDING` forever.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<TaskStatus, StatusError>>>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<TaskStatus, StatusError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch_status(&self, address: &str) -> Result<TaskStatus, StatusError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(address.to_string());

        tokio::task::yield_now().await;

        let next = self.script.lock().unwrap().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        next.unwrap_or_else(|| Ok(status("PENDING")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    Status(String),
    TotalRecords(String),
    StartTime(String),
    EndTime(String),
    Lock,
}

#[derive(Default)]
pub struct RecordingSink {
    renders: Mutex<Vec<Render>>,
}

impl RecordingSink {
    pub fn renders(&self) -> Vec<Render> {
        self.renders.lock().unwrap().clone()
    }

    pub fn status_renders(&self) -> Vec<String> {
        self.renders()
            .into_iter()
            .filter_map(|r| match r {
                Render::Status(value) => Some(value),
                _ => None,
            })
            .collect()
    }

    pub fn lock_count(&self) -> usize {
        self.renders()
            .iter()
            .filter(|r| **r == Render::Lock)
            .count()
    }

    fn push(&self, render: Render) {
        self.renders.lock().unwrap().push(render);
    }
}

impl RenderSink for RecordingSink {
    fn render_status(&self, value: &str) {
        self.push(Render::Status(value.to_string()));
    }

    fn render_total_records(&self, value: &str) {
        self.push(Render::TotalRecords(value.to_string()));
    }

    fn render_start_time(&self, value: &str) {
        self.push(Render::StartTime(value.to_string()));
    }

    fn render_end_time(&self, value: &str) {
        self.push(Render::EndTime(value.to_string()));
    }

    fn lock_controls(&self) {
        self.push(Render::Lock);
    }
}

/// Records every requested delay, then sleeps on the (paused) tokio clock.
#[derive(Default)]
pub struct RecordingTimer {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingTimer {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Timer for RecordingTimer {
    async fn sleep(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
        tokio::time::sleep(delay).await;
    }
}
