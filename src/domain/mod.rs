mod metrics;
mod store;
mod visitor;

// Publicly expose the Metrics abstraction
pub use self::metrics::{Metrics, MetricsPtr};

// Publicly expose the visitor store abstraction and its record
pub use store::{VisitorStore, VisitorStorePtr};
pub use visitor::{VisitorRecord, COUNT_FIELD, VISITOR_RECORD_ID};
