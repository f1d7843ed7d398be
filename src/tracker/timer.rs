use async_trait::async_trait;
use std::time::Duration;

/// Suspends a tracker between poll cycles.
#[async_trait]
pub trait Timer: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tokio_timer_waits_full_delay() {
        let start = tokio::time::Instant::now();
        TokioTimer.sleep(Duration::from_millis(2000)).await;
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
