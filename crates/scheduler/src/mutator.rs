use chrono::{Local, NaiveDate};

use classtable_core::conflict::{Conflicts, check_conflict};
use classtable_core::errors::{ScheduleError, ScheduleResult};
use classtable_core::models::session::Session;
use classtable_store::SessionStore;
use classtable_store::models::{SessionRecord, SessionWrite};

/// Parameters for placing a new session into a timetable cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub period_slot: u8,
    pub date: NaiveDate,
}

/// Sole writer for sessions.
///
/// Every mutation re-checks the client-side rules against the caller's
/// current in-memory snapshot before the store is involved: past-dated
/// sessions are read-only, subject and teacher are required, and a placement
/// that would double-book a class or teacher is rejected without a round
/// trip. The store re-checks authoritatively on its side.
///
/// The mutator does not own any cache; after a success the caller refetches
/// sessions and rebuilds its `CellIndex`.
pub struct ScheduleMutator<S> {
    store: S,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<S: SessionStore> ScheduleMutator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            today: local_today,
        }
    }

    /// Test seam: pins "today" instead of reading the local clock.
    pub fn with_today(store: S, today: fn() -> NaiveDate) -> Self {
        Self { store, today }
    }

    pub async fn create(
        &self,
        snapshot: &[Session],
        request: NewSession,
    ) -> ScheduleResult<Session> {
        self.guard_date(request.date)?;
        guard_required(request.subject_id, request.teacher_id)?;
        guard_conflicts(check_conflict(
            snapshot,
            request.class_id,
            request.period_slot,
            request.date,
            request.teacher_id,
            None,
        ))?;

        tracing::debug!(
            class = request.class_id,
            slot = request.period_slot,
            date = %request.date,
            "creating session"
        );
        let record = self
            .store
            .create_session(SessionWrite::new(
                request.class_id,
                request.subject_id,
                request.teacher_id,
                request.period_slot,
                request.date,
            ))
            .await?;
        refreshed(record)
    }

    /// Changes the subject/teacher of an existing session in place. The cell
    /// itself cannot move through an update, so only the teacher axis can
    /// newly conflict; the session is excluded from the check so it does not
    /// collide with itself.
    pub async fn update(
        &self,
        snapshot: &[Session],
        session_id: i64,
        subject_id: i64,
        teacher_id: i64,
    ) -> ScheduleResult<Session> {
        let existing = find(snapshot, session_id)?;
        self.guard_date(existing.date)?;
        guard_required(subject_id, teacher_id)?;
        guard_conflicts(check_conflict(
            snapshot,
            existing.class_id,
            existing.period_slot,
            existing.date,
            teacher_id,
            Some(session_id),
        ))?;

        tracing::debug!(session = session_id, subject = subject_id, teacher = teacher_id, "updating session");
        let record = self
            .store
            .update_session(
                session_id,
                SessionWrite::new(
                    existing.class_id,
                    subject_id,
                    teacher_id,
                    existing.period_slot,
                    existing.date,
                ),
            )
            .await?;
        refreshed(record)
    }

    pub async fn delete(&self, snapshot: &[Session], session_id: i64) -> ScheduleResult<()> {
        let existing = find(snapshot, session_id)?;
        self.guard_date(existing.date)?;

        tracing::debug!(session = session_id, "deleting session");
        self.store.delete_session(session_id).await?;
        Ok(())
    }

    fn guard_date(&self, date: NaiveDate) -> ScheduleResult<()> {
        if date < (self.today)() {
            return Err(ScheduleError::PastDateImmutable(date));
        }
        Ok(())
    }
}

fn find(snapshot: &[Session], session_id: i64) -> ScheduleResult<&Session> {
    snapshot
        .iter()
        .find(|session| session.id == session_id)
        .ok_or_else(|| ScheduleError::NotFound(format!("Session with ID {} not found", session_id)))
}

fn guard_required(subject_id: i64, teacher_id: i64) -> ScheduleResult<()> {
    if subject_id == 0 {
        return Err(ScheduleError::MissingField("subjectId"));
    }
    if teacher_id == 0 {
        return Err(ScheduleError::MissingField("teacherId"));
    }
    Ok(())
}

fn guard_conflicts(conflicts: Conflicts) -> ScheduleResult<()> {
    if conflicts.class_conflict {
        return Err(ScheduleError::ClassConflict);
    }
    if conflicts.teacher_conflict {
        return Err(ScheduleError::TeacherConflict);
    }
    Ok(())
}

fn refreshed(record: SessionRecord) -> ScheduleResult<Session> {
    let id = record.id;
    record.into_session().ok_or_else(|| {
        ScheduleError::Persistence(eyre::eyre!("store returned session {} with unreadable date", id))
    })
}
