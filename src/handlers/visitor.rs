use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::time::Instant;

use super::shared_types::{ProxyRequest, ProxyResponse, ResponseHeaders};
use crate::domain::{MetricsPtr, VisitorStorePtr, COUNT_FIELD, VISITOR_RECORD_ID};

/// The single route this function serves.
pub const VISITOR_METHOD: &str = "GET";
pub const VISITOR_PATH: &str = "/visitor";

pub const NOT_FOUND_MESSAGE: &str = "404 not found";
pub const ERROR_MESSAGE: &str = "Error processing request";

/// Visitor counter handler.
///
/// Built once per process and reused across invocations. It holds the store
/// client, the fixed response headers and the metrics sink; it keeps no
/// per-request state, so concurrent invocations need no coordination here.
///
/// # Behavior
///
/// - `GET /visitor`: atomically add one to the stored count, read the record
///   back and answer `200` with the new count as a JSON string.
/// - Any other method or path: `404` with `"404 not found"`, no store access.
/// - Any failure while counting (increment, read, missing record): logged,
///   answered with `400` and `"Error processing request"`.
#[derive(Clone)]
pub struct VisitorHandler {
    store: VisitorStorePtr,
    headers: ResponseHeaders,
    metrics: MetricsPtr,
}

impl VisitorHandler {
    // ---
    pub fn new(store: VisitorStorePtr, headers: ResponseHeaders, metrics: MetricsPtr) -> Self {
        // ---
        Self {
            store,
            headers,
            metrics,
        }
    }

    /// Get a reference to the metrics implementation.
    pub fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Handles one raw proxy event. Never fails: every outcome is a response.
    pub async fn handle(&self, event: &Value) -> ProxyResponse {
        // ---
        self.handle_request(&ProxyRequest::from_event(event)).await
    }

    #[tracing::instrument(skip(self, request), fields(method = request.method(), path = request.path()))]
    pub async fn handle_request(&self, request: &ProxyRequest) -> ProxyResponse {
        // ---
        let start = Instant::now();

        let response = match self.dispatch(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("Error: {:#}", err);
                self.respond(400, ERROR_MESSAGE)
            }
        };

        self.metrics.record_invocation(
            start,
            request.method(),
            request.path(),
            response.status_code,
        );

        response
    }

    async fn dispatch(&self, request: &ProxyRequest) -> Result<ProxyResponse> {
        // ---
        if request.method() != VISITOR_METHOD || request.path() != VISITOR_PATH {
            return Ok(self.respond(404, NOT_FOUND_MESSAGE));
        }

        let count = self.count_visit().await?;
        Ok(self.respond(200, &count.to_string()))
    }

    /// Increment, then read back. The read always follows the increment.
    async fn count_visit(&self) -> Result<u64> {
        // ---
        self.store
            .increment(VISITOR_RECORD_ID, COUNT_FIELD, 1)
            .await
            .context("Visitor count not updated")?;

        self.metrics.record_visit();

        let record = self
            .store
            .get(VISITOR_RECORD_ID)
            .await
            .context("Visitor count not read")?
            .ok_or_else(|| anyhow!("Visitor record '{VISITOR_RECORD_ID}' not found"))?;

        tracing::info!("Visitor count is now {}", record.count_visitors);
        Ok(record.count_visitors)
    }

    fn respond(&self, status_code: u16, message: &str) -> ProxyResponse {
        // ---
        ProxyResponse::new(status_code, &self.headers, message)
    }
}
