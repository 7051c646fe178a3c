// ABOUTME: Authenticated task CRUD over a pluggable task store
// ABOUTME: Validates input and enforces a session before any store call

use daybook_auth::AuthContext;
use daybook_core::{validate_new_task, validate_patch, NewTask, Session, Task, TaskPatch};
use daybook_storage::TaskStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{TaskError, TaskResult};

#[derive(Clone)]
pub struct TaskAdapter {
    store: Arc<dyn TaskStore>,
}

impl TaskAdapter {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    fn session(ctx: &AuthContext) -> TaskResult<&Session> {
        ctx.require().map_err(|_| {
            warn!("Task operation attempted without a valid session");
            TaskError::AuthenticationRequired
        })
    }

    pub async fn create(&self, ctx: &AuthContext, task: NewTask) -> TaskResult<Task> {
        let session = Self::session(ctx)?;
        validate_new_task(&task)?;

        debug!("Creating task '{}' for {}", task.title, session.user_id());
        let created = self.store.insert_task(session, &task).await?;
        info!("Created task {}", created.id);
        Ok(created)
    }

    /// Tasks owned by the session user, newest first
    pub async fn list(&self, ctx: &AuthContext) -> TaskResult<Vec<Task>> {
        let session = Self::session(ctx)?;
        debug!("Listing tasks for {}", session.user_id());
        Ok(self.store.list_tasks(session).await?)
    }

    pub async fn update(&self, ctx: &AuthContext, id: &str, patch: TaskPatch) -> TaskResult<Task> {
        let session = Self::session(ctx)?;
        validate_patch(&patch)?;

        debug!("Updating task {} with {:?}", id, patch);
        let updated = self.store.update_task(session, id, &patch).await?;
        info!("Updated task {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, ctx: &AuthContext, id: &str) -> TaskResult<()> {
        let session = Self::session(ctx)?;
        debug!("Deleting task {}", id);
        self.store.delete_task(session, id).await?;
        info!("Deleted task {}", id);
        Ok(())
    }
}
