use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use classtable_core::models::session::{Session, normalize_date};

/// Paginated envelope every list endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: u64,
}

/// A session as the query service serializes it. `date` may be a bare
/// calendar date or a full timestamp depending on the API version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    pub id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub period_slot: u8,
    pub date: String,
}

impl SessionRecord {
    /// Converts into the strict core model, normalizing the wire date.
    /// `None` means the record's date could not be read as a calendar date.
    pub fn into_session(self) -> Option<Session> {
        let date = normalize_date(&self.date)?;
        Some(Session {
            id: self.id,
            class_id: self.class_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            period_slot: self.period_slot,
            date,
        })
    }
}

/// Mutation body for session create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionWrite {
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub period_slot: u8,
    pub date: String,
}

impl SessionWrite {
    pub fn new(
        class_id: i64,
        subject_id: i64,
        teacher_id: i64,
        period_slot: u8,
        date: NaiveDate,
    ) -> Self {
        Self {
            class_id,
            subject_id,
            teacher_id,
            period_slot,
            // Always a bare calendar date on the wire; timestamps are where
            // the off-by-one drift comes from.
            date: date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Filter for the session list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub class_id: Option<i64>,
    pub page: u32,
}

/// Filter for the evaluation list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationQuery {
    pub period_ids: Vec<i64>,
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub page: u32,
}
