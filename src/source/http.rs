use crate::core::errors::StatusError;
use crate::core::models::TaskStatus;
use crate::source::StatusSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct HttpStatusSource {
    client: reqwest::Client,
}

impl HttpStatusSource {
    pub fn new(request_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("harvest-watch/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch_status(&self, address: &str) -> Result<TaskStatus, StatusError> {
        let transport = |source: reqwest::Error| StatusError::Transport {
            address: address.to_string(),
            source,
        };

        let response = self
            .client
            .get(address)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::Http {
                address: address.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        tracing::trace!(address, body = %String::from_utf8_lossy(&body), "Status response");

        serde_json::from_slice(&body).map_err(|source| StatusError::Payload {
            address: address.to_string(),
            source,
        })
    }
}
