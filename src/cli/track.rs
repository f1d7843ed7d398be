use crate::source::{HttpStatusSource, StatusSource};
use crate::tracker::{ConsoleSink, ProgressTracker, RenderSink, Timer, TokioTimer};
use anyhow::Result;
use std::sync::Arc;

pub async fn run(
    task_ids: Vec<String>,
    base_url: Option<String>,
    interval_ms: Option<u64>,
) -> Result<()> {
    let settings = super::load_settings(base_url, interval_ms)?;

    let source: Arc<dyn StatusSource> =
        Arc::new(HttpStatusSource::new(settings.server.request_timeout())?);
    let timer: Arc<dyn Timer> = Arc::new(TokioTimer);

    let mut handles = Vec::new();
    for task_id in unique_ids(task_ids) {
        let address = settings.server.status_address(&task_id);
        let sink: Arc<dyn RenderSink> = Arc::new(ConsoleSink::new(task_id));

        let tracker = ProgressTracker::new(Arc::clone(&source), sink, Arc::clone(&timer))
            .with_poll_interval(settings.polling.interval());
        handles.push(tracker.start_tracking(address));
    }

    if handles.is_empty() {
        anyhow::bail!("No task ids given");
    }

    let mut errored = 0;
    let mut interrupted = false;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    for handle in handles.iter_mut() {
        let address = handle.address().to_string();

        tokio::select! {
            result = handle.wait() => match result {
                Ok(outcome) => {
                    tracing::debug!(
                        %address,
                        polls = outcome.polls(),
                        error = outcome.is_error(),
                        "Tracker finished"
                    );
                    if outcome.is_error() {
                        errored += 1;
                    }
                }
                Err(e) => {
                    tracing::error!(%address, error = %e, "Tracker task failed");
                    errored += 1;
                }
            },
            _ = &mut ctrl_c => {
                interrupted = true;
                break;
            }
        }
    }

    if interrupted {
        tracing::info!("Interrupted, stopping trackers");
        for handle in &handles {
            handle.cancel();
        }
        return Ok(());
    }

    if errored > 0 {
        anyhow::bail!(
            "{} of {} tracked task(s) ended in ERROR",
            errored,
            handles.len()
        );
    }

    Ok(())
}

/// One tracker per status address.
fn unique_ids(task_ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    task_ids
        .into_iter()
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}
