use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical shape of an evaluation payload once field-name variants have
/// been resolved. Owned by a separate feature area upstream; read-only here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: i64,
    /// Identifier of the session the evaluation was recorded against, when
    /// the payload shape carries one.
    pub session_ref: Option<i64>,
    pub class_id: Option<i64>,
    pub period_slot: Option<u8>,
    /// Calendar date taken from the creation timestamp.
    pub date: Option<NaiveDate>,
    pub activity_id: Option<i64>,
    pub student_ids: Vec<i64>,
}
