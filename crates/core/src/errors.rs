use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Session dated {0} is in the past and read-only")]
    PastDateImmutable(NaiveDate),

    #[error("Class is already booked in this slot")]
    ClassConflict,

    #[error("Teacher is already booked in this slot")]
    TeacherConflict,

    #[error("Malformed school year label: {0}")]
    MalformedWeekLabel(String),

    #[error("Evaluation resolves to {candidates} sessions at cell {key}")]
    AmbiguousEvaluationMatch { key: String, candidates: usize },

    #[error("Persistence failure: {0}")]
    Persistence(#[from] eyre::Report),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
