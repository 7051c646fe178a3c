// ABOUTME: Supabase PostgREST and Storage client for tasks, profiles, and avatars
// ABOUTME: Every request carries the anon key plus the user's bearer token for row-level security

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daybook_config::SupabaseConfig;
use daybook_core::{NewTask, Profile, ProfileUpdate, Session, Task, TaskPatch};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::{AvatarStore, ProfileStore, TaskStore, AVATAR_BUCKET};

#[derive(Serialize)]
struct TaskInsert<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    task: &'a NewTask,
}

#[derive(Serialize)]
struct ProfileUpsert<'a> {
    id: &'a str,
    #[serde(flatten)]
    update: &'a ProfileUpdate,
    updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SupabaseStore {
    http_client: Client,
    project_url: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig, timeout: std::time::Duration) -> StorageResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            project_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.project_url, table)
    }

    fn object_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.project_url, AVATAR_BUCKET, object_path
        )
    }

    /// Public download URL for an object in the avatar bucket
    pub fn public_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.project_url, AVATAR_BUCKET, object_path
        )
    }

    fn authorized(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
    }

    async fn check(response: Response) -> StorageResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StorageError::Unauthorized),
            StatusCode::NOT_FOUND => Err(StorageError::NotFound),
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| status.to_string());
                Err(StorageError::Http {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn rows<T: DeserializeOwned>(response: Response) -> StorageResult<Vec<T>> {
        Ok(Self::check(response).await?.json().await?)
    }

    /// PostgREST returns an array even for single-row writes
    async fn single_row<T: DeserializeOwned>(response: Response) -> StorageResult<T> {
        Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or(StorageError::NotFound)
    }

    fn owned_task_filter(session: &Session, id: &str) -> [(&'static str, String); 2] {
        [
            ("id", format!("eq.{}", id)),
            ("user_id", format!("eq.{}", session.user_id())),
        ]
    }

    async fn get_task(&self, session: &Session, id: &str) -> StorageResult<Task> {
        let request = self
            .http_client
            .get(self.rest_url("tasks"))
            .query(&Self::owned_task_filter(session, id))
            .query(&[("select", "*")]);

        let response = self.authorized(request, session).send().await?;
        Self::single_row(response).await
    }
}

#[async_trait]
impl TaskStore for SupabaseStore {
    async fn insert_task(&self, session: &Session, task: &NewTask) -> StorageResult<Task> {
        let request = self
            .http_client
            .post(self.rest_url("tasks"))
            .header("Prefer", "return=representation")
            .json(&TaskInsert {
                user_id: session.user_id(),
                task,
            });

        let response = self.authorized(request, session).send().await?;
        let created: Task = Self::single_row(response).await?;
        info!("Created task {} for {}", created.id, created.user_id);
        Ok(created)
    }

    async fn list_tasks(&self, session: &Session) -> StorageResult<Vec<Task>> {
        let request = self.http_client.get(self.rest_url("tasks")).query(&[
            ("select", "*".to_string()),
            ("user_id", format!("eq.{}", session.user_id())),
            ("order", "created_at.desc".to_string()),
        ]);

        let response = self.authorized(request, session).send().await?;
        let tasks: Vec<Task> = Self::rows(response).await?;
        debug!("Fetched {} tasks for {}", tasks.len(), session.user_id());
        Ok(tasks)
    }

    async fn update_task(
        &self,
        session: &Session,
        id: &str,
        patch: &TaskPatch,
    ) -> StorageResult<Task> {
        if patch.is_empty() {
            return self.get_task(session, id).await;
        }

        let request = self
            .http_client
            .patch(self.rest_url("tasks"))
            .query(&Self::owned_task_filter(session, id))
            .header("Prefer", "return=representation")
            .json(patch);

        let response = self.authorized(request, session).send().await?;
        let updated = Self::single_row(response).await?;
        debug!("Updated task {}", id);
        Ok(updated)
    }

    async fn delete_task(&self, session: &Session, id: &str) -> StorageResult<()> {
        let request = self
            .http_client
            .delete(self.rest_url("tasks"))
            .query(&Self::owned_task_filter(session, id))
            .header("Prefer", "return=representation");

        let response = self.authorized(request, session).send().await?;
        let deleted: Vec<serde_json::Value> = Self::rows(response).await?;
        if deleted.is_empty() {
            return Err(StorageError::NotFound);
        }

        info!("Deleted task {}", id);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for SupabaseStore {
    async fn get_profile(&self, session: &Session) -> StorageResult<Option<Profile>> {
        let request = self.http_client.get(self.rest_url("profiles")).query(&[
            ("select", "*".to_string()),
            ("id", format!("eq.{}", session.user_id())),
        ]);

        let response = self.authorized(request, session).send().await?;
        let profiles: Vec<Profile> = Self::rows(response).await?;
        Ok(profiles.into_iter().next())
    }

    async fn upsert_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> StorageResult<Profile> {
        let request = self
            .http_client
            .post(self.rest_url("profiles"))
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&ProfileUpsert {
                id: session.user_id(),
                update,
                updated_at: Utc::now(),
            });

        let response = self.authorized(request, session).send().await?;
        let profile = Self::single_row(response).await?;
        info!("Saved profile for {}", session.user_id());
        Ok(profile)
    }
}

#[async_trait]
impl AvatarStore for SupabaseStore {
    async fn upload_avatar(
        &self,
        session: &Session,
        object_path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> StorageResult<String> {
        let size = bytes.len();
        let request = self
            .http_client
            .post(self.object_url(object_path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);

        let response = self.authorized(request, session).send().await?;
        Self::check(response).await?;

        info!("Uploaded avatar {} ({} bytes)", object_path, size);
        Ok(self.public_url(object_path))
    }
}
