// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod lambda;
mod local;
mod metrics;
mod shared_types;
mod visitor;

// Event and response shapes
pub use shared_types::{ProxyRequest, ProxyResponse, ResponseHeaders};

// Visitor counter
pub use visitor::{
    VisitorHandler, // ---
    ERROR_MESSAGE,
    NOT_FOUND_MESSAGE,
    VISITOR_METHOD,
    VISITOR_PATH,
};

// Runtime adapters
pub use lambda::{lambda_handler, run_lambda};
pub use local::proxy_handler;
pub use self::metrics::metrics_handler;
