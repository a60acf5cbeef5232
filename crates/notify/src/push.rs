//! Push delivery to an Expo-compatible gateway.
//!
//! [`PushClient`] POSTs batches of up to 100 messages to the gateway URL.
//! Every batch is a single attempt with no retry: the callers run on a cron
//! cadence, so the next tick is the retry. Failures are collected per
//! recipient in the [`DispatchReport`] and never propagated, because a dead
//! gateway must not fail the event transition that triggered the fan-out.

use std::time::Duration;

use serde::Serialize;

/// Gateway hard limit on messages per request.
pub const MAX_BATCH_SIZE: usize = 100;

/// HTTP request timeout for a single batch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for push delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("Push gateway returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Message and report
// ---------------------------------------------------------------------------

/// One notification addressed to one device token.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub to: String,
    pub title: String,
    pub body: String,
    /// Opaque routing payload for the mobile client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Delivery outcome for one recipient token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    Failed(String),
}

/// Per-recipient outcomes of one fan-out pass.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// `(token, outcome)` for every message handed to [`PushClient::dispatch`].
    pub outcomes: Vec<(String, DispatchOutcome)>,
}

impl DispatchReport {
    pub fn sent(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == DispatchOutcome::Delivered)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.sent()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Fold another report into this one. The engines aggregate per-event
    /// reports into a per-run report.
    pub fn merge(&mut self, other: DispatchReport) {
        self.outcomes.extend(other.outcomes);
    }
}

// ---------------------------------------------------------------------------
// PushClient
// ---------------------------------------------------------------------------

/// Delivers notifications to the configured push gateway.
pub struct PushClient {
    client: reqwest::Client,
    gateway_url: String,
}

impl PushClient {
    /// Create a new client with a pre-configured HTTP client.
    pub fn new(gateway_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            gateway_url: gateway_url.into(),
        }
    }

    /// Send every message, chunked to the gateway batch limit.
    ///
    /// Batches go out concurrently. A failed batch marks each of its
    /// recipients failed with the batch error; the rest still deliver.
    pub async fn dispatch(&self, messages: Vec<PushMessage>) -> DispatchReport {
        let mut report = DispatchReport::default();
        if messages.is_empty() {
            return report;
        }

        let batches: Vec<&[PushMessage]> = messages.chunks(MAX_BATCH_SIZE).collect();
        let sends = batches.iter().map(|batch| self.send_batch(batch));
        let results = futures::future::join_all(sends).await;

        for (batch, result) in batches.iter().zip(results) {
            match result {
                Ok(()) => {
                    report.outcomes.extend(
                        batch
                            .iter()
                            .map(|m| (m.to.clone(), DispatchOutcome::Delivered)),
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        count = batch.len(),
                        "Push batch delivery failed"
                    );
                    let reason = e.to_string();
                    report.outcomes.extend(
                        batch
                            .iter()
                            .map(|m| (m.to.clone(), DispatchOutcome::Failed(reason.clone()))),
                    );
                }
            }
        }
        report
    }

    /// Execute a single POST of one batch and check the response status.
    async fn send_batch(&self, batch: &[PushMessage]) -> Result<(), PushError> {
        let response = self
            .client
            .post(&self.gateway_url)
            .json(&batch)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PushError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
