// ABOUTME: Persistence seams for tasks, profiles, and avatar images
// ABOUTME: Supabase REST/Storage backends with an offline SQLite and filesystem fallback

use async_trait::async_trait;
use daybook_core::{NewTask, Profile, ProfileUpdate, Session, Task, TaskPatch};

pub mod error;
pub mod local_avatars;
pub mod sqlite;
pub mod supabase;

pub use error::{StorageError, StorageResult};
pub use local_avatars::LocalAvatarStore;
pub use sqlite::SqliteStore;
pub use supabase::SupabaseStore;

/// Bucket holding profile pictures
pub const AVATAR_BUCKET: &str = "avatars";

/// Row-level access to the `tasks` table, always scoped to the session's user
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a task owned by the session user and return the stored row
    async fn insert_task(&self, session: &Session, task: &NewTask) -> StorageResult<Task>;

    /// All tasks of the session user, newest first
    async fn list_tasks(&self, session: &Session) -> StorageResult<Vec<Task>>;

    /// Apply `patch` to one of the session user's tasks and return the updated row
    async fn update_task(&self, session: &Session, id: &str, patch: &TaskPatch)
        -> StorageResult<Task>;

    async fn delete_task(&self, session: &Session, id: &str) -> StorageResult<()>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// `None` when the user has never saved a profile
    async fn get_profile(&self, session: &Session) -> StorageResult<Option<Profile>>;

    /// Insert or merge the session user's profile row
    async fn upsert_profile(&self, session: &Session, update: &ProfileUpdate)
        -> StorageResult<Profile>;
}

#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Store `bytes` under `object_path` and return a URL the image can be fetched from
    async fn upload_avatar(
        &self,
        session: &Session,
        object_path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> StorageResult<String>;
}

/// Object path for a new avatar: `{user_id}/{random}.{ext}`
pub fn avatar_object_path(user_id: &str, extension: &str) -> String {
    format!(
        "{}/{}.{}",
        user_id,
        daybook_core::random_file_segment(),
        extension
    )
}

/// MIME type for an image file extension
pub fn content_type_for(extension: &str) -> mime::Mime {
    match extension.to_ascii_lowercase().as_str() {
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "bmp" => mime::IMAGE_BMP,
        "webp" => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
