// ABOUTME: Shared fixtures for task workflow tests
// ABOUTME: Sessions, a pinned clock, and a store that always fails

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use daybook_auth::AuthContext;
use daybook_core::{FixedClock, NewTask, Session, Task, TaskPatch, User};
use daybook_storage::{StorageError, StorageResult, TaskStore};

pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock(now())
}

pub fn session(user_id: &str) -> Session {
    Session {
        access_token: "token".to_string(),
        refresh_token: None,
        expires_at: Utc::now() + Duration::hours(1),
        user: User {
            id: user_id.to_string(),
            email: None,
        },
    }
}

pub fn signed_in(user_id: &str) -> AuthContext {
    AuthContext::authenticated(session(user_id))
}

/// Store that rejects every call with a server error
pub struct FailingStore;

fn unavailable() -> StorageError {
    StorageError::Http {
        status: 503,
        message: "unavailable".to_string(),
    }
}

#[async_trait]
impl TaskStore for FailingStore {
    async fn insert_task(&self, _session: &Session, _task: &NewTask) -> StorageResult<Task> {
        Err(unavailable())
    }

    async fn list_tasks(&self, _session: &Session) -> StorageResult<Vec<Task>> {
        Err(unavailable())
    }

    async fn update_task(
        &self,
        _session: &Session,
        _id: &str,
        _patch: &TaskPatch,
    ) -> StorageResult<Task> {
        Err(unavailable())
    }

    async fn delete_task(&self, _session: &Session, _id: &str) -> StorageResult<()> {
        Err(unavailable())
    }
}
