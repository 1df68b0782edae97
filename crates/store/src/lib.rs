//! Client for the school persistence/query service.
//!
//! The scheduling engine never talks to a database; sessions, evaluations and
//! activities live behind a REST-shaped collaborator. This crate defines that
//! collaborator as the [`SessionStore`] trait, the wire models it exchanges,
//! a reqwest-backed implementation, and a mock for tests. Retry/backoff
//! policy belongs to the network layer, not here.

pub mod config;
pub mod mock;
pub mod models;
pub mod rest;

use async_trait::async_trait;
use eyre::Result;
use serde_json::Value;

use classtable_core::models::activity::Activity;

use crate::models::{EvaluationQuery, Paginated, SessionQuery, SessionRecord, SessionWrite};

/// The persistence/query surface the scheduling engine depends on.
///
/// Evaluations are returned as raw JSON values: their field names vary
/// across upstream API versions and canonicalization is the binder's job,
/// not the transport's.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn list_sessions(&self, query: SessionQuery) -> Result<Paginated<SessionRecord>>;

    async fn create_session(&self, body: SessionWrite) -> Result<SessionRecord>;

    async fn update_session(&self, id: i64, body: SessionWrite) -> Result<SessionRecord>;

    async fn delete_session(&self, id: i64) -> Result<()>;

    async fn list_evaluations(&self, query: EvaluationQuery) -> Result<Paginated<Value>>;

    async fn list_activities(&self) -> Result<Vec<Activity>>;
}
