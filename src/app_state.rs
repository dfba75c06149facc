//! State shared by the local development server's Axum handlers.
//!
//! The state wraps the same [`VisitorHandler`] the Lambda adapter uses, so a
//! request served locally goes through exactly the code path of a Lambda
//! invocation. Cloning is cheap: the handler holds its dependencies in `Arc`s.

use crate::domain::MetricsPtr;
use crate::handlers::VisitorHandler;

/// Shared application state passed to the local server's handlers.
///
/// Built once in `create_router()`, attached with `.with_state(..)` and
/// cloned by Axum for each request.
#[derive(Clone)]
pub(crate) struct AppState {
    /// The visitor counter, with its store and metrics already injected.
    handler: VisitorHandler,
}

impl AppState {
    // ---

    pub fn new(handler: VisitorHandler) -> Self {
        // ---
        AppState { handler }
    }

    /// Get a reference to the visitor handler.
    pub(crate) fn handler(&self) -> &VisitorHandler {
        // ---
        &self.handler
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        self.handler.metrics()
    }
}
