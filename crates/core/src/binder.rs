//! Joins externally-owned evaluation records onto timetable cells.
//!
//! Evaluation payloads arrive in whatever shape the upstream API version of
//! the day produced, so every logical field is probed under all of its known
//! names before any matching happens. Matching prefers the explicit session
//! reference; the composite (class, slot, date) key is only a fallback for
//! older payload shapes. Read-side only: nothing here mutates sessions or
//! evaluations.

use std::collections::HashMap;

use serde_json::Value;

use crate::errors::ScheduleError;
use crate::grid::cell_key;
use crate::models::activity::Activity;
use crate::models::evaluation::Evaluation;
use crate::models::session::{Session, normalize_date};

// Field-name variants seen across upstream API versions. Order matters: the
// first present, non-null value wins.
const ID_FIELDS: &[&str] = &["id", "Id", "evaluationId", "evaluationid"];
const SESSION_REF_FIELDS: &[&str] = &["periodId", "periodid", "PeriodId"];
const CLASS_FIELDS: &[&str] = &["classId", "classid", "ClassId"];
const SLOT_FIELDS: &[&str] = &["periodNo", "periodno", "PeriodNo", "period"];
const CREATED_FIELDS: &[&str] = &["createdAt", "createdat", "CreatedAt"];
const ACTIVITY_FIELDS: &[&str] = &["activityId", "activityid", "ActivityId"];
const STUDENT_FIELDS: &[&str] = &["students", "studentIds", "studentids", "Students"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundEvaluation {
    pub evaluation: Evaluation,
    pub polarity: Polarity,
}

/// Evaluations joined onto the displayed week's sessions. `unmatched` keeps
/// everything that could not be placed, so no evaluation disappears from
/// view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationBinding {
    pub by_session: HashMap<i64, Vec<BoundEvaluation>>,
    pub unmatched: Vec<Evaluation>,
}

/// Flattens one raw payload into the canonical record. `None` only for
/// payloads that are not JSON objects at all.
pub fn canonicalize_evaluation(payload: &Value) -> Option<Evaluation> {
    payload.as_object()?;
    Some(Evaluation {
        id: pick_i64(payload, ID_FIELDS).unwrap_or(0),
        // A zero reference is the unsaved-session sentinel, not a real id.
        session_ref: pick_i64(payload, SESSION_REF_FIELDS).filter(|id| *id > 0),
        class_id: pick_i64(payload, CLASS_FIELDS),
        period_slot: pick_i64(payload, SLOT_FIELDS).and_then(|slot| u8::try_from(slot).ok()),
        date: pick_date(payload, CREATED_FIELDS),
        activity_id: pick_i64(payload, ACTIVITY_FIELDS),
        student_ids: pick_students(payload),
    })
}

/// Binds each raw evaluation to at most one of the given sessions.
pub fn bind_evaluations(
    sessions: &[Session],
    raw_evaluations: &[Value],
    activities: &HashMap<i64, Activity>,
) -> EvaluationBinding {
    let by_id: HashMap<i64, &Session> = sessions.iter().map(|s| (s.id, s)).collect();
    let mut by_cell: HashMap<String, Vec<&Session>> = HashMap::new();
    for session in sessions {
        by_cell
            .entry(cell_key(session.class_id, session.period_slot, session.date))
            .or_default()
            .push(session);
    }

    let mut binding = EvaluationBinding::default();
    for payload in raw_evaluations {
        let Some(evaluation) = canonicalize_evaluation(payload) else {
            tracing::warn!("discarding evaluation payload that is not an object");
            continue;
        };
        match resolve(&evaluation, &by_id, &by_cell) {
            Ok(Some(session_id)) => {
                let polarity = classify(&evaluation, activities);
                binding
                    .by_session
                    .entry(session_id)
                    .or_default()
                    .push(BoundEvaluation { evaluation, polarity });
            }
            Ok(None) => binding.unmatched.push(evaluation),
            Err(err) => {
                tracing::warn!(evaluation = evaluation.id, %err, "skipping evaluation");
                binding.unmatched.push(evaluation);
            }
        }
    }
    binding
}

/// Resolves the session an evaluation belongs to, or `None` when it cannot
/// be placed on any displayed session.
fn resolve(
    evaluation: &Evaluation,
    by_id: &HashMap<i64, &Session>,
    by_cell: &HashMap<String, Vec<&Session>>,
) -> Result<Option<i64>, ScheduleError> {
    // The explicit reference is authoritative even when the composite fields
    // disagree with it. A reference to a session outside the displayed set
    // stays unmatched; guessing a cell for it would misbind.
    if let Some(reference) = evaluation.session_ref {
        return Ok(by_id.get(&reference).map(|session| session.id));
    }

    let (Some(class_id), Some(period_slot), Some(date)) =
        (evaluation.class_id, evaluation.period_slot, evaluation.date)
    else {
        return Ok(None);
    };
    let key = cell_key(class_id, period_slot, date);
    match by_cell.get(&key).map(Vec::as_slice) {
        Some([only]) => Ok(Some(only.id)),
        Some(candidates) if candidates.len() > 1 => Err(ScheduleError::AmbiguousEvaluationMatch {
            key,
            candidates: candidates.len(),
        }),
        _ => Ok(None),
    }
}

/// Negative only when the linked activity says so; an unresolvable activity
/// reads as positive so the evaluation still displays.
fn classify(evaluation: &Evaluation, activities: &HashMap<i64, Activity>) -> Polarity {
    let negative = evaluation
        .activity_id
        .and_then(|id| activities.get(&id))
        .map(|activity| activity.is_negative)
        .unwrap_or(false);
    if negative { Polarity::Negative } else { Polarity::Positive }
}

fn pick<'a>(payload: &'a Value, names: &[&str]) -> Option<&'a Value> {
    let object = payload.as_object()?;
    names
        .iter()
        .filter_map(|name| object.get(*name))
        .find(|value| !value.is_null())
}

fn pick_i64(payload: &Value, names: &[&str]) -> Option<i64> {
    as_i64(pick(payload, names)?)
}

fn pick_date(payload: &Value, names: &[&str]) -> Option<chrono::NaiveDate> {
    normalize_date(pick(payload, names)?.as_str()?)
}

fn pick_students(payload: &Value) -> Vec<i64> {
    let Some(entries) = pick(payload, STUDENT_FIELDS).and_then(Value::as_array) else {
        return Vec::new();
    };
    entries.iter().filter_map(student_id).collect()
}

/// Student lists carry bare ids in newer payloads and nested objects in
/// older ones.
fn student_id(entry: &Value) -> Option<i64> {
    match entry {
        Value::Object(_) => pick_i64(entry, &["studentId", "studentid", "StudentId", "id"]),
        other => as_i64(other),
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
