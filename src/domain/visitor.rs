use serde::{Deserialize, Serialize};

/// Key of the single record this service ever touches.
pub const VISITOR_RECORD_ID: &str = "visitors";

/// Name of the numeric attribute holding the visit count.
pub const COUNT_FIELD: &str = "count_visitors";

/// The one row of the visitor table.
///
/// The record is provisioned out-of-band and only ever mutated by an atomic
/// `+1`, so `count_visitors` never decreases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorRecord {
    pub id: String,
    pub count_visitors: u64,
}

impl VisitorRecord {
    // ---
    pub fn new(id: impl Into<String>, count_visitors: u64) -> Self {
        // ---
        Self {
            id: id.into(),
            count_visitors,
        }
    }
}
