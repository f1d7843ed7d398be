use crate::core::models::{FieldValue, TaskStatus};
use crate::source::{HttpStatusSource, StatusSource};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct StatusOutput {
    task_id: String,
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    fetched_at: DateTime<Utc>,
}

pub async fn run(task_id: String, json: bool, base_url: Option<String>) -> Result<()> {
    let settings = super::load_settings(base_url, None)?;
    let address = settings.server.status_address(&task_id);

    let source = HttpStatusSource::new(settings.server.request_timeout())?;
    let result = source.fetch_status(&address).await;

    if json {
        let (status, error) = match result {
            Ok(status) => (Some(status), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let output = StatusOutput {
            task_id,
            address,
            status,
            error,
            fetched_at: Utc::now(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);

        if let Some(error) = output.error {
            anyhow::bail!(error);
        }
        return Ok(());
    }

    let status = result?;
    print_text_output(&task_id, &status);
    Ok(())
}

fn print_text_output(task_id: &str, status: &TaskStatus) {
    println!("{}", task_id);
    for (label, value) in text_lines(status) {
        println!("  {:<14} {}", format!("{}:", label), value);
    }
}

fn text_lines(status: &TaskStatus) -> Vec<(&'static str, String)> {
    let field = |value: &Option<FieldValue>| {
        value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let mut lines = vec![("Status", status.state.to_string())];
    if status.is_terminal() {
        lines.push(("Total records", field(&status.total_records)));
        lines.push(("Start time", field(&status.start_time)));
        lines.push(("End time", field(&status.end_time)));
    }
    lines
}
