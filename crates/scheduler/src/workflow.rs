//! Explicit state for the place-a-session workflow.
//!
//! One enum instead of a pile of independent "modal open" / "edit mode"
//! flags. Transitions happen only through [`PlacementFlow`]'s methods,
//! driven by mutator outcomes, and are decoupled from any rendering concern.

use chrono::NaiveDate;

use classtable_core::errors::ScheduleError;

/// One timetable cell, as the screens address it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub class_id: i64,
    pub period_slot: u8,
    pub date: NaiveDate,
}

/// Why a placement attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    PastDate,
    MissingField,
    ClassBusy,
    TeacherBusy,
}

impl BlockReason {
    /// Maps a mutator rejection to a reason the screens can display.
    /// Persistence and lookup failures are not placement blocks.
    pub fn from_error(error: &ScheduleError) -> Option<Self> {
        match error {
            ScheduleError::PastDateImmutable(_) => Some(Self::PastDate),
            ScheduleError::MissingField(_) => Some(Self::MissingField),
            ScheduleError::ClassConflict => Some(Self::ClassBusy),
            ScheduleError::TeacherConflict => Some(Self::TeacherBusy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlacementState {
    #[default]
    Idle,
    /// A cell is picked and the form is open.
    Placing(CellRef),
    /// The attempt was refused client-side or by the store.
    Blocked { cell: CellRef, reason: BlockReason },
    /// The write is in flight.
    Committing(CellRef),
    /// The store confirmed, with the assigned session id.
    Committed(i64),
}

/// Drives [`PlacementState`] through its legal transitions. Illegal events
/// are ignored (the screens may race user input against store responses);
/// they never panic and never corrupt the state.
#[derive(Debug, Default)]
pub struct PlacementFlow {
    state: PlacementState,
}

impl PlacementFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    /// Idle/Committed -> Placing.
    pub fn select(&mut self, cell: CellRef) {
        match self.state {
            PlacementState::Idle | PlacementState::Committed(_) => {
                self.state = PlacementState::Placing(cell);
            }
            _ => self.ignore("select"),
        }
    }

    /// Placing/Committing -> Blocked, recording why the attempt was refused.
    /// Committing is a legal source because the store may refuse a write the
    /// advisory check let through.
    pub fn block(&mut self, reason: BlockReason) {
        match self.state {
            PlacementState::Placing(cell) | PlacementState::Committing(cell) => {
                self.state = PlacementState::Blocked { cell, reason };
            }
            _ => self.ignore("block"),
        }
    }

    /// Blocked -> Placing, after the user corrected the input.
    pub fn retry(&mut self) {
        match self.state {
            PlacementState::Blocked { cell, .. } => {
                self.state = PlacementState::Placing(cell);
            }
            _ => self.ignore("retry"),
        }
    }

    /// Placing -> Committing, once the write is in flight.
    pub fn begin_commit(&mut self) {
        match self.state {
            PlacementState::Placing(cell) => {
                self.state = PlacementState::Committing(cell);
            }
            _ => self.ignore("begin_commit"),
        }
    }

    /// Committing -> Committed with the store-assigned session id.
    pub fn complete(&mut self, session_id: i64) {
        match self.state {
            PlacementState::Committing(_) => {
                self.state = PlacementState::Committed(session_id);
            }
            _ => self.ignore("complete"),
        }
    }

    /// Any state -> Idle.
    pub fn reset(&mut self) {
        self.state = PlacementState::Idle;
    }

    fn ignore(&self, event: &str) {
        tracing::debug!(event, state = ?self.state, "ignoring invalid placement transition");
    }
}
