use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::NaiveDate;

use crate::models::session::Session;

/// Composite key addressing one timetable cell.
pub fn cell_key(class_id: i64, period_slot: u8, date: NaiveDate) -> String {
    format!("{}|{}|{}", class_id, period_slot, date.format("%Y-%m-%d"))
}

/// O(1) lookup from (class, slot, date) to the occupying session.
///
/// The index is a derived value: build it from a fresh session snapshot and
/// rebuild after every mutation. Consulting a stale index after a write is a
/// caller bug.
#[derive(Debug, Clone, Default)]
pub struct CellIndex {
    cells: HashMap<String, Session>,
}

impl CellIndex {
    pub fn build(sessions: &[Session]) -> Self {
        let mut cells: HashMap<String, Session> = HashMap::with_capacity(sessions.len());
        for session in sessions {
            match cells.entry(cell_key(session.class_id, session.period_slot, session.date)) {
                Entry::Vacant(cell) => {
                    cell.insert(session.clone());
                }
                Entry::Occupied(occupied) => {
                    // Two sessions in one cell means upstream conflict
                    // checking failed; keep the first occupant rather than
                    // silently overwriting.
                    tracing::error!(
                        key = occupied.key().as_str(),
                        first = occupied.get().id,
                        second = session.id,
                        "duplicate timetable cell in session snapshot"
                    );
                }
            }
        }
        Self { cells }
    }

    pub fn get(&self, class_id: i64, period_slot: u8, date: NaiveDate) -> Option<&Session> {
        self.cells.get(&cell_key(class_id, period_slot, date))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.cells.keys()
    }
}
