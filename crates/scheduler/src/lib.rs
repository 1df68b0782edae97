//! # Classtable Scheduler
//!
//! Orchestration layer the session-management screens call into. It wires
//! the pure scheduling logic from `classtable-core` to the persistence
//! collaborator behind `classtable-store`.
//!
//! ## Architecture
//!
//! - **Mutator**: create/update/delete of sessions, with the client-side
//!   guard rails (past-date immutability, required fields, advisory conflict
//!   check) applied before anything leaves the process
//! - **View**: assembly of one displayed week — session pages, the cell
//!   index, bound evaluations — plus stale-response discard when the user
//!   has already moved on
//! - **Workflow**: the explicit placement state machine the screens drive
//!
//! All scheduling computation is synchronous; the only suspension points are
//! the store calls. The engine assumes a single editor mutating at a time,
//! with the server as source of truth: after a successful mutation the
//! caller refetches and rebuilds its view, never patches it incrementally.

pub mod mutator;
pub mod view;
pub mod workflow;
