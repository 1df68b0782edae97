use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use classtable_core::models::activity::Activity;

use crate::SessionStore;
use crate::models::{EvaluationQuery, Paginated, SessionQuery, SessionRecord, SessionWrite};

// Mock store for tests that exercise the engine without a live service.
mock! {
    pub SessionStore {}

    #[async_trait]
    impl SessionStore for SessionStore {
        async fn list_sessions(&self, query: SessionQuery) -> eyre::Result<Paginated<SessionRecord>>;

        async fn create_session(&self, body: SessionWrite) -> eyre::Result<SessionRecord>;

        async fn update_session(&self, id: i64, body: SessionWrite) -> eyre::Result<SessionRecord>;

        async fn delete_session(&self, id: i64) -> eyre::Result<()>;

        async fn list_evaluations(&self, query: EvaluationQuery) -> eyre::Result<Paginated<Value>>;

        async fn list_activities(&self) -> eyre::Result<Vec<Activity>>;
    }
}
