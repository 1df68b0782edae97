use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A Monday-start, 7-day window of the school year. Computed, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub week_number: u32,
}
