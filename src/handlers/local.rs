use axum::{
    extract::State,
    http::{Method, Uri},
    response::IntoResponse,
};

use super::shared_types::ProxyRequest;
use crate::app_state::AppState;

/// Fallback for the local development server.
///
/// Turns the incoming request into the same method/path pair the Lambda
/// event carries and lets the visitor handler decide, so routing behaves
/// identically with or without API Gateway in front.
pub async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> impl IntoResponse {
    // ---
    let request = ProxyRequest::new(method.as_str(), uri.path());
    state.handler().handle_request(&request).await
}
