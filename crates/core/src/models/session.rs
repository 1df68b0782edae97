use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scheduled occurrence of a subject taught by a teacher to a class, on a
/// date, in a fixed daily slot. `id` is 0 until the store has assigned one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub period_slot: u8,
    pub date: NaiveDate,
}

impl Session {
    /// Normalized `YYYY-MM-DD` form used in composite cell keys.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Display start/end times for the eight daily slots. Static metadata only;
/// the scheduling invariants never look at clock times.
pub const SLOT_TIMES: [(&str, &str); 8] = [
    ("08:00", "08:40"),
    ("08:50", "09:30"),
    ("09:40", "10:20"),
    ("10:30", "11:10"),
    ("11:20", "12:00"),
    ("13:00", "13:40"),
    ("13:50", "14:30"),
    ("14:40", "15:20"),
];

pub fn slot_times(slot: u8) -> Option<(&'static str, &'static str)> {
    if (1..=8).contains(&slot) {
        Some(SLOT_TIMES[(slot - 1) as usize])
    } else {
        None
    }
}

/// Extracts the calendar date from a wire date string.
///
/// Upstream serializers emit either `YYYY-MM-DD` or a full timestamp. The
/// date the server meant is always the leading component; running the value
/// through a timezone conversion instead can shift it by a day.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
