// ABOUTME: Builds the auth manager, task adapter, and profile service for the configured backend
// ABOUTME: Supabase talks to the hosted project; local keeps everything under the data directory

use daybook_auth::{AuthContext, AuthManager, AuthProvider, LocalAuth, SessionStore, SupabaseAuth};
use daybook_config::{Backend, DaybookConfig};
use daybook_core::{Clock, SystemClock};
use daybook_storage::{
    AvatarStore, LocalAvatarStore, ProfileStore, SqliteStore, SupabaseStore, TaskStore,
};
use daybook_tasks::{ProfileService, ReminderTicker, TaskAdapter, TaskViewModel};
use std::sync::Arc;
use tracing::debug;

use crate::error::CliResult;

pub struct App {
    pub config: DaybookConfig,
    pub auth: AuthManager,
    pub tasks: TaskAdapter,
    pub profiles: ProfileService,
    pub clock: Arc<dyn Clock>,
}

impl App {
    /// Load configuration from the file and environment, then build the app
    pub async fn load() -> CliResult<Self> {
        Self::from_config(DaybookConfig::load()?).await
    }

    pub async fn from_config(config: DaybookConfig) -> CliResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock)).await
    }

    pub async fn with_clock(config: DaybookConfig, clock: Arc<dyn Clock>) -> CliResult<Self> {
        let sessions = SessionStore::new(config.session_path());

        let (provider, task_store, profile_store, avatar_store): (
            Arc<dyn AuthProvider>,
            Arc<dyn TaskStore>,
            Arc<dyn ProfileStore>,
            Arc<dyn AvatarStore>,
        ) = match config.backend {
            Backend::Supabase => {
                debug!("Using Supabase backend at {}", config.supabase.url);
                let store = Arc::new(SupabaseStore::new(&config.supabase, config.http_timeout())?);
                let auth = SupabaseAuth::new(&config.supabase, config.http_timeout())?;
                let tasks: Arc<dyn TaskStore> = store.clone();
                let profiles: Arc<dyn ProfileStore> = store.clone();
                (Arc::new(auth), tasks, profiles, store)
            }
            Backend::Local => {
                debug!("Using local backend at {}", config.data_dir().display());
                let store = Arc::new(SqliteStore::open(&config.db_path()).await?);
                let tasks: Arc<dyn TaskStore> = store.clone();
                (
                    Arc::new(LocalAuth::new()),
                    tasks,
                    store,
                    Arc::new(LocalAvatarStore::new(config.avatar_dir())),
                )
            }
        };

        Ok(Self {
            auth: AuthManager::new(provider, sessions),
            tasks: TaskAdapter::new(task_store),
            profiles: ProfileService::new(profile_store, avatar_store),
            clock,
            config,
        })
    }

    /// Current auth context, refreshing or discarding an expired session
    pub async fn context(&self) -> CliResult<AuthContext> {
        Ok(self.auth.restore().await?)
    }

    pub fn view_model(&self) -> TaskViewModel {
        TaskViewModel::new(self.tasks.clone(), Arc::clone(&self.clock))
    }

    pub fn reminder_ticker(&self) -> ReminderTicker {
        ReminderTicker::new(&self.config.reminders, Arc::clone(&self.clock))
    }
}
