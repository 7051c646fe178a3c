// ABOUTME: SQLite-backed task and profile store for the offline backend
// ABOUTME: Mirrors the hosted tables and scopes every query by user id

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use daybook_core::serde_time::{format_clock_time, parse_clock_time};
use daybook_core::{NewTask, Profile, ProfileUpdate, Session, Task, TaskPatch};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::{ProfileStore, TaskStore};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and run migrations
    pub async fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let database_url = format!("sqlite:{}", path.display());
        if !sqlx::Sqlite::database_exists(&database_url).await? {
            debug!("Creating database at: {}", database_url);
            sqlx::Sqlite::create_database(&database_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await?;

        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database; a single connection keeps it alive
    pub async fn in_memory() -> StorageResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> StorageResult<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("SQLite store ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn row_to_task(row: &SqliteRow) -> StorageResult<Task> {
        let date: String = row.try_get("date")?;
        let time: Option<String> = row.try_get("time")?;
        let created_at: String = row.try_get("created_at")?;

        let time = match time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                parse_clock_time(raw)
                    .map_err(|e| StorageError::InvalidData(format!("time '{}': {}", raw, e)))?,
            ),
        };

        Ok(Task {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            tag: row.try_get("tag")?,
            date: parse_date_column(&date)?,
            time,
            is_starred: row.try_get("is_starred")?,
            is_completed: row.try_get("is_completed")?,
            created_at: parse_timestamp_column(&created_at)?,
        })
    }

    fn row_to_profile(row: &SqliteRow) -> StorageResult<Profile> {
        let date_of_birth: Option<String> = row.try_get("date_of_birth")?;
        let updated_at: Option<String> = row.try_get("updated_at")?;

        Ok(Profile {
            id: row.try_get("id")?,
            full_name: row.try_get("full_name")?,
            avatar_url: row.try_get("avatar_url")?,
            date_of_birth: date_of_birth.as_deref().map(parse_date_column).transpose()?,
            about: row.try_get("about")?,
            updated_at: updated_at
                .as_deref()
                .map(parse_timestamp_column)
                .transpose()?,
        })
    }

    async fn fetch_task(&self, session: &Session, id: &str) -> StorageResult<Task> {
        let row = sqlx::query("SELECT * FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(session.user_id())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Self::row_to_task(&row)
    }
}

fn parse_date_column(raw: &str) -> StorageResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| StorageError::InvalidData(format!("date '{}': {}", raw, e)))
}

fn parse_timestamp_column(raw: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StorageError::InvalidData(format!("timestamp '{}': {}", raw, e)))
}

fn timestamp_column(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[async_trait]
impl TaskStore for SqliteStore {
    async fn insert_task(&self, session: &Session, task: &NewTask) -> StorageResult<Task> {
        let created = Task {
            id: nanoid::nanoid!(),
            user_id: session.user_id().to_string(),
            title: task.title.clone(),
            tag: task.tag.clone(),
            date: task.date,
            time: task.time,
            is_starred: task.is_starred,
            is_completed: task.is_completed,
            // Stored with microsecond precision
            created_at: Utc::now().trunc_subsecs(6),
        };

        sqlx::query(
            r#"
            INSERT INTO tasks (id, user_id, title, tag, date, time, is_starred, is_completed, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&created.id)
        .bind(&created.user_id)
        .bind(&created.title)
        .bind(&created.tag)
        .bind(created.date.format(DATE_FORMAT).to_string())
        .bind(created.time.as_ref().map(format_clock_time))
        .bind(created.is_starred)
        .bind(created.is_completed)
        .bind(timestamp_column(&created.created_at))
        .execute(&self.pool)
        .await?;

        debug!("Inserted task {} for {}", created.id, created.user_id);
        Ok(created)
    }

    async fn list_tasks(&self, session: &Session) -> StorageResult<Vec<Task>> {
        let rows = sqlx::query(
            "SELECT * FROM tasks WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(session.user_id())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_task).collect()
    }

    async fn update_task(
        &self,
        session: &Session,
        id: &str,
        patch: &TaskPatch,
    ) -> StorageResult<Task> {
        let mut task = self.fetch_task(session, id).await?;
        if patch.is_empty() {
            return Ok(task);
        }
        task.apply(patch);

        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, tag = ?, date = ?, time = ?, is_starred = ?, is_completed = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&task.title)
        .bind(&task.tag)
        .bind(task.date.format(DATE_FORMAT).to_string())
        .bind(task.time.as_ref().map(format_clock_time))
        .bind(task.is_starred)
        .bind(task.is_completed)
        .bind(id)
        .bind(session.user_id())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        debug!("Updated task {}", id);
        Ok(task)
    }

    async fn delete_task(&self, session: &Session, id: &str) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(session.user_id())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        debug!("Deleted task {}", id);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for SqliteStore {
    async fn get_profile(&self, session: &Session) -> StorageResult<Option<Profile>> {
        let row = sqlx::query("SELECT * FROM profiles WHERE id = ?")
            .bind(session.user_id())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_profile).transpose()
    }

    async fn upsert_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> StorageResult<Profile> {
        let row = sqlx::query(
            r#"
            INSERT INTO profiles (id, full_name, avatar_url, date_of_birth, about, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                full_name = COALESCE(excluded.full_name, profiles.full_name),
                avatar_url = COALESCE(excluded.avatar_url, profiles.avatar_url),
                date_of_birth = COALESCE(excluded.date_of_birth, profiles.date_of_birth),
                about = COALESCE(excluded.about, profiles.about),
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(session.user_id())
        .bind(&update.full_name)
        .bind(&update.avatar_url)
        .bind(update.date_of_birth.map(|d| d.format(DATE_FORMAT).to_string()))
        .bind(&update.about)
        .bind(timestamp_column(&Utc::now()))
        .fetch_one(&self.pool)
        .await?;

        info!("Saved profile for {}", session.user_id());
        Self::row_to_profile(&row)
    }
}
