use serde::{Deserialize, Serialize};

/// A categorized evaluation reason, flagged positive or negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    pub label: String,
    pub is_negative: bool,
}
