use chrono::NaiveDate;

use crate::models::session::Session;

/// Outcome of the advisory double-booking check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Conflicts {
    pub class_conflict: bool,
    pub teacher_conflict: bool,
}

impl Conflicts {
    pub fn is_clear(&self) -> bool {
        !self.class_conflict && !self.teacher_conflict
    }
}

/// Checks whether placing `teacher_id` in front of `class_id` at
/// (`period_slot`, `date`) would double-book either party.
///
/// `exclude_session_id` names the session being edited in place, so that a
/// subject/teacher change does not collide with itself. Dates here are
/// already normalized calendar dates, so equality is the `YYYY-MM-DD`
/// comparison. The authoritative check lives in the persistence service;
/// this one rejects a known-bad write before it leaves the client.
pub fn check_conflict(
    sessions: &[Session],
    class_id: i64,
    period_slot: u8,
    date: NaiveDate,
    teacher_id: i64,
    exclude_session_id: Option<i64>,
) -> Conflicts {
    let mut conflicts = Conflicts::default();
    for session in sessions {
        if exclude_session_id == Some(session.id) {
            continue;
        }
        if session.period_slot != period_slot || session.date != date {
            continue;
        }
        if session.class_id == class_id {
            conflicts.class_conflict = true;
        }
        if session.teacher_id == teacher_id {
            conflicts.teacher_conflict = true;
        }
        if conflicts.class_conflict && conflicts.teacher_conflict {
            break;
        }
    }
    conflicts
}
