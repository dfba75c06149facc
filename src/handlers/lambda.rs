use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use super::shared_types::ProxyResponse;
use super::visitor::VisitorHandler;

/// Lambda entry point for one invocation.
///
/// The payload is taken as raw JSON so that a malformed event still reaches
/// the route check instead of failing deserialization.
pub async fn lambda_handler(
    handler: &VisitorHandler,
    event: LambdaEvent<Value>,
) -> Result<ProxyResponse, Error> {
    // ---
    tracing::debug!("Invocation {}", event.context.request_id);
    Ok(handler.handle(&event.payload).await)
}

/// Polls the Lambda runtime API until the platform shuts the process down.
pub async fn run_lambda(handler: VisitorHandler) -> anyhow::Result<()> {
    // ---
    tracing::info!("Starting visitor counter on the Lambda runtime");

    lambda_runtime::run(service_fn(|event| lambda_handler(&handler, event)))
        .await
        .map_err(|err| anyhow::anyhow!(err))
}
