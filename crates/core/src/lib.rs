//! Domain core for the classtable scheduling engine: models, error taxonomy,
//! week generation, the timetable cell index, the advisory conflict check and
//! the evaluation binder. Everything here is pure and synchronous.

pub mod binder;
pub mod conflict;
pub mod errors;
pub mod grid;
pub mod models;
pub mod weeks;
