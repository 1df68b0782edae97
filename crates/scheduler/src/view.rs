use std::collections::HashMap;

use serde_json::Value;

use classtable_core::binder::{EvaluationBinding, bind_evaluations};
use classtable_core::errors::{ScheduleError, ScheduleResult};
use classtable_core::grid::CellIndex;
use classtable_core::models::activity::Activity;
use classtable_core::models::session::Session;
use classtable_core::models::week::Week;
use classtable_core::weeks::generate_weeks;
use classtable_store::SessionStore;
use classtable_store::models::{EvaluationQuery, SessionQuery};

/// What the user is currently looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSelection {
    pub year_label: String,
    pub week_number: u32,
    pub class_id: Option<i64>,
}

/// Everything one timetable screen needs for a selected week.
#[derive(Debug, Clone)]
pub struct WeekView {
    pub selection: WeekSelection,
    pub week: Week,
    pub sessions: Vec<Session>,
    pub cells: CellIndex,
    pub evaluations: EvaluationBinding,
}

/// Assembles a [`WeekView`] from the store: all session pages for the week
/// window, the evaluations recorded against those sessions, and the activity
/// catalog for classifying them.
pub struct WeekViewLoader<S> {
    store: S,
}

impl<S: SessionStore> WeekViewLoader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn load(&self, selection: &WeekSelection) -> ScheduleResult<WeekView> {
        let week = generate_weeks(&selection.year_label)
            .into_iter()
            .find(|week| week.week_number == selection.week_number)
            .ok_or_else(|| {
                ScheduleError::NotFound(format!(
                    "Week {} not found in school year {}",
                    selection.week_number, selection.year_label
                ))
            })?;

        let sessions = self.fetch_sessions(&week, selection.class_id).await?;
        let raw_evaluations = self.fetch_evaluations(&sessions, selection.class_id).await?;
        let activities = self.fetch_activities().await?;

        let evaluations = bind_evaluations(&sessions, &raw_evaluations, &activities);
        let cells = CellIndex::build(&sessions);

        Ok(WeekView {
            selection: selection.clone(),
            week,
            sessions,
            cells,
            evaluations,
        })
    }

    async fn fetch_sessions(
        &self,
        week: &Week,
        class_id: Option<i64>,
    ) -> ScheduleResult<Vec<Session>> {
        let mut sessions = Vec::new();
        let mut page = 1;
        loop {
            let batch = self
                .store
                .list_sessions(SessionQuery {
                    start_date: week.start,
                    end_date: week.end,
                    class_id,
                    page,
                })
                .await?;
            let total_pages = batch.total_pages.max(1);
            for record in batch.items {
                let record_id = record.id;
                match record.into_session() {
                    Some(session) => sessions.push(session),
                    None => {
                        tracing::warn!(session = record_id, "skipping session record with unreadable date");
                    }
                }
            }
            if page >= total_pages {
                break;
            }
            page += 1;
        }
        Ok(sessions)
    }

    async fn fetch_evaluations(
        &self,
        sessions: &[Session],
        class_id: Option<i64>,
    ) -> ScheduleResult<Vec<Value>> {
        let period_ids: Vec<i64> = sessions
            .iter()
            .map(|session| session.id)
            .filter(|id| *id > 0)
            .collect();
        if period_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut evaluations = Vec::new();
        let mut page = 1;
        loop {
            let batch = self
                .store
                .list_evaluations(EvaluationQuery {
                    period_ids: period_ids.clone(),
                    class_id,
                    teacher_id: None,
                    page,
                })
                .await?;
            let total_pages = batch.total_pages.max(1);
            evaluations.extend(batch.items);
            if page >= total_pages {
                break;
            }
            page += 1;
        }
        Ok(evaluations)
    }

    async fn fetch_activities(&self) -> ScheduleResult<HashMap<i64, Activity>> {
        let activities = self.store.list_activities().await?;
        Ok(activities
            .into_iter()
            .map(|activity| (activity.id, activity))
            .collect())
    }
}

/// Holds the view for the current selection and drops responses that arrive
/// after the user has already moved to another week.
///
/// Loads run concurrently with user input: when a newer selection supersedes
/// an in-flight request, the old week's response must never overwrite the
/// new week's state.
#[derive(Debug, Default)]
pub struct WeekPanel {
    current: Option<WeekSelection>,
    view: Option<WeekView>,
}

impl WeekPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `selection` as what the user is looking at; any previously
    /// displayed week becomes stale from this point on.
    pub fn select(&mut self, selection: WeekSelection) {
        if self.current.as_ref() != Some(&selection) {
            self.view = None;
        }
        self.current = Some(selection);
    }

    /// Installs a loaded view if it still answers the current selection.
    /// Returns whether the view was accepted.
    pub fn apply(&mut self, view: WeekView) -> bool {
        if self.current.as_ref() == Some(&view.selection) {
            self.view = Some(view);
            true
        } else {
            tracing::debug!(
                answered = ?view.selection,
                current = ?self.current,
                "discarding stale week response"
            );
            false
        }
    }

    pub fn current(&self) -> Option<&WeekSelection> {
        self.current.as_ref()
    }

    pub fn view(&self) -> Option<&WeekView> {
        self.view.as_ref()
    }
}
