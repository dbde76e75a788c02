//! Upstream endpoint definitions and HTTP fetching.
//!
//! This module owns the fixed endpoint list and the client used to fetch
//! each endpoint's JSON payload. Failures are typed so the pipeline can
//! record them without aborting the run.

use crate::models::{Endpoint, Source};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const FIND_API_BASE: &str = "https://openrouter.ai/api/frontend/models/find";

/// Returns the fixed endpoint list, in visit order.
pub fn endpoints() -> Vec<Endpoint> {
    Source::ALL
        .iter()
        .map(|&source| Endpoint {
            source,
            url: format!("{}?arch={}", FIND_API_BASE, source.label()),
        })
        .collect()
}

/// Why a single endpoint fetch failed.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// The request itself failed (connection-level).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-200 status.
    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },
    /// The body was not valid JSON.
    #[error("Failed to parse JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP client for the upstream feed endpoints.
pub struct FeedClient {
    client: reqwest::Client,
    user_agent: String,
}

impl FeedClient {
    /// Create a client with the given per-request timeout and User-Agent.
    pub fn new(timeout_seconds: u64, user_agent: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, user_agent }
    }

    /// Fetch one endpoint and decode the body as JSON.
    ///
    /// Success means HTTP 200 and a valid JSON body; anything else maps to
    /// the matching `FetchFailure` variant.
    pub async fn fetch(&self, url: &str) -> Result<Value, FetchFailure> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchFailure::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        let payload = serde_json::from_str(&body)?;
        Ok(payload)
    }
}
