// ABOUTME: In-memory task list state with filtering, tag aggregation, and confirmed mutations
// ABOUTME: Only changes the list after the store confirms, and publishes snapshots to watchers

use chrono::NaiveDate;
use daybook_auth::AuthContext;
use daybook_core::{Clock, Task, TaskPatch};
use daybook_tags::{custom_tags, tag_counts, TagCount, TagSelection};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

use crate::adapter::TaskAdapter;
use crate::draft::TaskDraft;
use crate::error::TaskError;
use crate::notice::Notice;

/// Shared read-only view of the current list
pub type TaskSnapshot = Arc<Vec<Task>>;

pub struct TaskViewModel {
    adapter: TaskAdapter,
    clock: Arc<dyn Clock>,
    tasks: Vec<Task>,
    search: String,
    selected_tag: TagSelection,
    selected_date: Option<NaiveDate>,
    snapshots: watch::Sender<TaskSnapshot>,
}

impl TaskViewModel {
    pub fn new(adapter: TaskAdapter, clock: Arc<dyn Clock>) -> Self {
        let (snapshots, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            adapter,
            clock,
            tasks: Vec::new(),
            search: String::new(),
            selected_tag: TagSelection::default(),
            selected_date: None,
            snapshots,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Receiver that sees every confirmed change to the list
    pub fn subscribe(&self) -> watch::Receiver<TaskSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn selected_tag(&self) -> &TagSelection {
        &self.selected_tag
    }

    pub fn select_tag(&mut self, tag: TagSelection) {
        self.selected_tag = tag;
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        self.selected_date = date;
    }

    /// Tasks matching the search text, selected tag, and selected date
    pub fn filtered(&self) -> Vec<&Task> {
        let today = self.clock.today();
        let needle = self.search.to_lowercase();

        self.tasks
            .iter()
            .filter(|task| task.title.to_lowercase().contains(&needle))
            .filter(|task| self.selected_tag.matches(task, today))
            .filter(|task| self.selected_date.map_or(true, |date| task.date == date))
            .collect()
    }

    pub fn tag_counts(&self) -> Vec<TagCount> {
        tag_counts(&self.tasks, self.clock.today())
    }

    pub fn custom_tags(&self) -> Vec<String> {
        custom_tags(&self.tasks)
    }

    fn publish(&self) {
        self.snapshots.send_replace(Arc::new(self.tasks.clone()));
    }

    fn failure(message: &str, err: &TaskError) -> Notice {
        error!("{}: {}", message, err);
        match err {
            TaskError::AuthenticationRequired | TaskError::ValidationFailed(_) => {
                Notice::error(format!("{}: {}", message, err))
            }
            TaskError::StoreOperationFailed(_) => Notice::error(message),
        }
    }

    fn replace(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id == updated.id) {
            *slot = updated;
        }
        self.publish();
    }

    /// Replace the list with the store's current contents
    pub async fn load(&mut self, ctx: &AuthContext) -> Notice {
        match self.adapter.list(ctx).await {
            Ok(tasks) => {
                info!("Loaded {} tasks", tasks.len());
                self.tasks = tasks;
                self.publish();
                Notice::success(format!("Loaded {} tasks", self.tasks.len()))
            }
            Err(e) => Self::failure("Failed to load tasks", &e),
        }
    }

    pub async fn create(&mut self, ctx: &AuthContext, draft: TaskDraft) -> Notice {
        let new_task = match draft.into_new_task(self.clock.now()) {
            Ok(task) => task,
            Err(e) => return Self::failure("Failed to create task", &TaskError::from(e)),
        };

        match self.adapter.create(ctx, new_task).await {
            Ok(created) => {
                self.tasks.insert(0, created);
                self.publish();
                Notice::success("Task created")
            }
            Err(e) => Self::failure("Failed to create task", &e),
        }
    }

    pub async fn set_completed(&mut self, ctx: &AuthContext, id: &str, completed: bool) -> Notice {
        match self.adapter.update(ctx, id, TaskPatch::completed(completed)).await {
            Ok(updated) => {
                self.replace(updated);
                Notice::success(format!(
                    "Task marked as {}",
                    if completed { "completed" } else { "incomplete" }
                ))
            }
            Err(e) => Self::failure("Failed to update task", &e),
        }
    }

    pub async fn set_starred(&mut self, ctx: &AuthContext, id: &str, starred: bool) -> Notice {
        match self.adapter.update(ctx, id, TaskPatch::starred(starred)).await {
            Ok(updated) => {
                self.replace(updated);
                Notice::success(format!(
                    "Task {} as important",
                    if starred { "marked" } else { "unmarked" }
                ))
            }
            Err(e) => Self::failure("Failed to update task", &e),
        }
    }

    pub async fn edit_title(&mut self, ctx: &AuthContext, id: &str, title: &str) -> Notice {
        let patch = TaskPatch::title(title.trim());
        match self.adapter.update(ctx, id, patch).await {
            Ok(updated) => {
                self.replace(updated);
                Notice::success("Task updated")
            }
            Err(e) => Self::failure("Failed to update task", &e),
        }
    }

    pub async fn retag(&mut self, ctx: &AuthContext, id: &str, tag: &str) -> Notice {
        match self.adapter.update(ctx, id, TaskPatch::tag(tag.trim())).await {
            Ok(updated) => {
                let notice = Notice::success(format!("Task moved to {}", updated.tag));
                self.replace(updated);
                notice
            }
            Err(e) => Self::failure("Failed to update task", &e),
        }
    }

    pub async fn delete(&mut self, ctx: &AuthContext, id: &str) -> Notice {
        match self.adapter.delete(ctx, id).await {
            Ok(()) => {
                self.tasks.retain(|task| task.id != id);
                self.publish();
                Notice::success("Task deleted")
            }
            Err(e) => Self::failure("Failed to delete task", &e),
        }
    }
}
