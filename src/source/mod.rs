mod http;

#[cfg(test)]
pub(crate) mod testing;

use crate::core::errors::StatusError;
use crate::core::models::TaskStatus;
use async_trait::async_trait;

pub use http::HttpStatusSource;

/// Performs a single status check for a task's status address.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, address: &str) -> Result<TaskStatus, StatusError>;
}
