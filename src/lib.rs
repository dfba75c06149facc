// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{routing::get, Router};

use handlers::{metrics_handler, proxy_handler};

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;

pub use config::*;

// Hoist up the handler surface
pub use handlers::{
    lambda_handler, // ---
    run_lambda,
    ProxyRequest,
    ProxyResponse,
    ResponseHeaders,
    VisitorHandler,
    ERROR_MESSAGE,
    NOT_FOUND_MESSAGE,
    VISITOR_METHOD,
    VISITOR_PATH,
};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_dynamodb_store, // ---
    create_memory_store,
    create_noop_metrics,
    create_prom_metrics,
    create_redis_store,
    MemoryStore,
};

/// Initialize the global tracing subscriber once; later calls are ignored.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. ANSI colors are
/// off so CloudWatch shows plain text.
pub fn init_tracing() {
    // ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .try_init()
        .ok();
}

/// Build the store selected by configuration.
pub async fn create_store(config: &StoreConfig) -> Result<domain::VisitorStorePtr> {
    // ---
    match &config.backend {
        StoreBackend::DynamoDb { region } => create_dynamodb_store(&config.table_name, region).await,
        StoreBackend::Redis { url } => create_redis_store(url, &config.table_name),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; counts are lost on restart");
            create_memory_store()
        }
    }
}

/// Build the metrics backend selected by configuration.
pub fn create_metrics(config: &MetricsConfig) -> Result<domain::MetricsPtr> {
    // ---
    match config.kind {
        MetricsKind::Prometheus => create_prom_metrics(),
        MetricsKind::Noop => create_noop_metrics(),
    }
}

/// Wire the visitor handler from configuration. Called once per process.
pub async fn create_handler(config: &AppConfig) -> Result<VisitorHandler> {
    // ---
    let store = create_store(&config.store).await?;
    let metrics = create_metrics(&config.metrics)?;

    if metrics_unexposed(config) {
        tracing::warn!(
            "VISITOR_METRICS_TYPE=prom under Lambda: metrics are recorded but only the local server exposes /metrics"
        );
    }
    let headers = ResponseHeaders::new(&config.cors.allowed_origin);

    Ok(VisitorHandler::new(store, headers, metrics))
}

/// Prometheus metrics are only scraped through the local server's `/metrics`.
fn metrics_unexposed(config: &AppConfig) -> bool {
    // ---
    config.metrics.kind == MetricsKind::Prometheus && config.runtime == RuntimeMode::Lambda
}

/// Build the local development router around a ready handler.
///
/// `GET /metrics` is served directly; every other request, including other
/// methods on `/metrics`, is handed to the visitor handler, which owns
/// routing and answers 404 itself.
pub fn create_router(handler: VisitorHandler) -> Router {
    // ---
    Router::new()
        .route("/metrics", get(metrics_handler).fallback(proxy_handler))
        .fallback(proxy_handler)
        .with_state(AppState::new(handler))
}

/// Serve the local development router until the process is interrupted.
pub async fn serve_local(handler: VisitorHandler, bind_addr: &str) -> Result<()> {
    // ---
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    tracing::info!("Starting at endpoint:{}", bind_addr);
    tracing::info!("Starting visitor counter v{} locally...", env!("CARGO_PKG_VERSION"));

    axum::serve(listener, create_router(handler))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // ---
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn config_with(kind: MetricsKind, runtime: RuntimeMode) -> AppConfig {
        // ---
        AppConfig {
            store: StoreConfig {
                table_name: "visitor-table".to_string(),
                backend: StoreBackend::Memory,
            },
            cors: CorsConfig {
                allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            },
            metrics: MetricsConfig { kind },
            runtime,
        }
    }

    #[test]
    fn prometheus_under_lambda_is_unexposed() {
        // ---
        let local = RuntimeMode::Local {
            bind_addr: "127.0.0.1:8080".to_string(),
        };

        assert!(metrics_unexposed(&config_with(MetricsKind::Prometheus, RuntimeMode::Lambda)));
        assert!(!metrics_unexposed(&config_with(MetricsKind::Prometheus, local.clone())));
        assert!(!metrics_unexposed(&config_with(MetricsKind::Noop, RuntimeMode::Lambda)));
        assert!(!metrics_unexposed(&config_with(MetricsKind::Noop, local)));
    }
}
