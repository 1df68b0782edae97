use async_trait::async_trait;
use eyre::{Result, eyre};
use reqwest::Method;
use serde_json::Value;

use classtable_core::models::activity::Activity;

use crate::SessionStore;
use crate::config::StoreConfig;
use crate::models::{EvaluationQuery, Paginated, SessionQuery, SessionRecord, SessionWrite};

/// [`SessionStore`] over the school REST API.
pub struct RestSessionStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl RestSessionStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.config.base_url, path));
        if let Some(token) = &self.config.api_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

async fn checked(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(eyre!("Failed to {}: {} {}", action, status, error_text));
    }
    Ok(response)
}

#[async_trait]
impl SessionStore for RestSessionStore {
    async fn list_sessions(&self, query: SessionQuery) -> Result<Paginated<SessionRecord>> {
        tracing::debug!(
            start = %query.start_date,
            end = %query.end_date,
            class = ?query.class_id,
            page = query.page,
            "listing sessions"
        );

        let mut params = vec![
            ("startDate".to_string(), query.start_date.to_string()),
            ("endDate".to_string(), query.end_date.to_string()),
            ("page".to_string(), query.page.to_string()),
            ("pageSize".to_string(), self.config.page_size.to_string()),
        ];
        if let Some(class_id) = query.class_id {
            params.push(("classId".to_string(), class_id.to_string()));
        }

        let response = self
            .request(Method::GET, "/api/sessions")
            .query(&params)
            .send()
            .await?;
        let response = checked(response, "list sessions").await?;
        Ok(response.json().await?)
    }

    async fn create_session(&self, body: SessionWrite) -> Result<SessionRecord> {
        tracing::debug!(class = body.class_id, slot = body.period_slot, date = %body.date, "creating session");

        let response = self
            .request(Method::POST, "/api/sessions")
            .json(&body)
            .send()
            .await?;
        let response = checked(response, "create session").await?;
        Ok(response.json().await?)
    }

    async fn update_session(&self, id: i64, body: SessionWrite) -> Result<SessionRecord> {
        tracing::debug!(session = id, "updating session");

        let response = self
            .request(Method::PUT, &format!("/api/sessions/{}", id))
            .json(&body)
            .send()
            .await?;
        let response = checked(response, "update session").await?;
        Ok(response.json().await?)
    }

    async fn delete_session(&self, id: i64) -> Result<()> {
        tracing::debug!(session = id, "deleting session");

        let response = self
            .request(Method::DELETE, &format!("/api/sessions/{}", id))
            .send()
            .await?;
        checked(response, "delete session").await?;
        Ok(())
    }

    async fn list_evaluations(&self, query: EvaluationQuery) -> Result<Paginated<Value>> {
        tracing::debug!(
            periods = query.period_ids.len(),
            class = ?query.class_id,
            page = query.page,
            "listing evaluations"
        );

        let mut params: Vec<(String, String)> = query
            .period_ids
            .iter()
            .map(|id| ("periodId".to_string(), id.to_string()))
            .collect();
        if let Some(class_id) = query.class_id {
            params.push(("classId".to_string(), class_id.to_string()));
        }
        if let Some(teacher_id) = query.teacher_id {
            params.push(("teacherId".to_string(), teacher_id.to_string()));
        }
        params.push(("page".to_string(), query.page.to_string()));
        params.push(("pageSize".to_string(), self.config.page_size.to_string()));

        let response = self
            .request(Method::GET, "/api/evaluations")
            .query(&params)
            .send()
            .await?;
        let response = checked(response, "list evaluations").await?;
        Ok(response.json().await?)
    }

    async fn list_activities(&self) -> Result<Vec<Activity>> {
        let response = self.request(Method::GET, "/api/activities").send().await?;
        let response = checked(response, "list activities").await?;
        Ok(response.json().await?)
    }
}
