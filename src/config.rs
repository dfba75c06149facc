// src/config.rs

//! Function configuration loaded from environment variables.
//!
//! Everything is read once, at cold start. Failures are treated as
//! deployment errors rather than recoverable runtime conditions: the process
//! exits before it accepts a single event.

use anyhow::Result;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// Fails fast with a human-readable message if the variable is missing.
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated function configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: store::StoreConfig,
    pub cors: cors::CorsConfig,
    pub metrics: metrics::MetricsConfig,
    pub runtime: runtime::RuntimeMode,
}

impl AppConfig {
    /// Loads and validates all configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            store: store::StoreConfig::from_env()?,
            cors: cors::CorsConfig::from_env(),
            metrics: metrics::MetricsConfig::from_env()?,
            runtime: runtime::RuntimeMode::from_env(),
        })
    }
}

// ============================================================
// Store configuration
// ============================================================

mod store {
    // ---
    use super::*;
    use std::str::FromStr;

    /// Which backend holds the visitor record.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum StoreBackend {
        DynamoDb { region: String },
        Redis { url: String },
        Memory,
    }

    /// Backend name as written in `VISITOR_STORE`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum BackendKind {
        DynamoDb,
        Redis,
        Memory,
    }

    impl FromStr for BackendKind {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            // ---
            match s.to_ascii_lowercase().as_str() {
                "dynamodb" => Ok(Self::DynamoDb),
                "redis" => Ok(Self::Redis),
                "memory" => Ok(Self::Memory),
                other => Err(anyhow::anyhow!(
                    "Unknown VISITOR_STORE '{other}' (expected dynamodb, redis or memory)"
                )),
            }
        }
    }

    /// Where the visitor record lives.
    #[derive(Debug, Clone)]
    pub struct StoreConfig {
        /// Table name for DynamoDB; key namespace for Redis.
        pub table_name: String,

        /// Selected backend with its connection settings.
        pub backend: StoreBackend,
    }

    impl StoreConfig {
        /// Builds a [`StoreConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `VISITOR_TABLE` is missing, the backend name is
        /// unknown, or the selected backend lacks its connection settings.
        pub fn from_env() -> Result<Self> {
            // ---
            let table_name = required_env!("VISITOR_TABLE");

            let kind = match std::env::var("VISITOR_STORE") {
                Ok(name) => name.parse::<BackendKind>()?,
                Err(_) => BackendKind::DynamoDb,
            };

            let backend = match kind {
                BackendKind::DynamoDb => StoreBackend::DynamoDb {
                    region: optional_env_parse!(
                        "VISITOR_AWS_REGION",
                        String,
                        "us-east-1".to_string()
                    ),
                },
                BackendKind::Redis => StoreBackend::Redis {
                    url: required_env!("VISITOR_REDIS_URL"),
                },
                BackendKind::Memory => StoreBackend::Memory,
            };

            Ok(Self {
                table_name,
                backend,
            })
        }
    }
}
pub use store::{StoreBackend, StoreConfig};

// ============================================================
// CORS configuration
// ============================================================

mod cors {
    // ---

    /// Origin advertised by the original frontend deployment.
    pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://www.thepott.dev";

    /// Cross-origin settings applied to every response.
    #[derive(Debug, Clone)]
    pub struct CorsConfig {
        /// Value of `Access-Control-Allow-Origin`.
        pub allowed_origin: String,
    }

    impl CorsConfig {
        pub fn from_env() -> Self {
            // ---
            let allowed_origin = std::env::var("VISITOR_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string());

            Self { allowed_origin }
        }
    }
}
pub use cors::{CorsConfig, DEFAULT_ALLOWED_ORIGIN};

// ============================================================
// Metrics configuration
// ============================================================

mod metrics {
    // ---
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MetricsKind {
        Noop,
        Prometheus,
    }

    #[derive(Debug, Clone)]
    pub struct MetricsConfig {
        pub kind: MetricsKind,
    }

    impl MetricsConfig {
        /// Reads `VISITOR_METRICS_TYPE` (`noop` by default, or `prom`).
        pub fn from_env() -> Result<Self> {
            // ---
            let kind = match std::env::var("VISITOR_METRICS_TYPE").as_deref() {
                Err(_) | Ok("noop") => MetricsKind::Noop,
                Ok("prom") => MetricsKind::Prometheus,
                Ok(other) => anyhow::bail!("Unknown VISITOR_METRICS_TYPE '{other}'"),
            };

            Ok(Self { kind })
        }
    }
}
pub use self::metrics::{MetricsConfig, MetricsKind};

// ============================================================
// Runtime mode
// ============================================================

mod runtime {
    // ---

    /// How the binary receives events.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RuntimeMode {
        /// Poll the Lambda runtime API for invocations.
        Lambda,

        /// Serve plain HTTP on a local address for development.
        Local { bind_addr: String },
    }

    impl RuntimeMode {
        /// Lambda when the platform has set `AWS_LAMBDA_RUNTIME_API`,
        /// otherwise a local server on `VISITOR_BIND_ADDR`.
        pub fn from_env() -> Self {
            // ---
            if std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
                return Self::Lambda;
            }

            let bind_addr = std::env::var("VISITOR_BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8080".to_string());

            Self::Local { bind_addr }
        }
    }
}
pub use runtime::RuntimeMode;

// ============================================================
// Tests
// ============================================================
