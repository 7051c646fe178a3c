// ABOUTME: Filesystem avatar store used by the offline backend
// ABOUTME: Writes images below a data directory and hands back file:// URLs

use async_trait::async_trait;
use daybook_core::Session;
use std::path::{Component, Path, PathBuf};
use tracing::info;

use crate::error::{StorageError, StorageResult};
use crate::AvatarStore;

#[derive(Debug, Clone)]
pub struct LocalAvatarStore {
    root: PathBuf,
}

impl LocalAvatarStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `object_path` below the root, rejecting anything that escapes it
    fn resolve(&self, object_path: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(object_path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || object_path.is_empty() {
            return Err(StorageError::InvalidData(format!(
                "invalid object path '{}'",
                object_path
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AvatarStore for LocalAvatarStore {
    async fn upload_avatar(
        &self,
        session: &Session,
        object_path: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> StorageResult<String> {
        if !object_path.starts_with(&format!("{}/", session.user_id())) {
            return Err(StorageError::Unauthorized);
        }

        let target = self.resolve(object_path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;

        let absolute = tokio::fs::canonicalize(&target).await?;
        let url = url::Url::from_file_path(&absolute).map_err(|_| {
            StorageError::InvalidData(format!("cannot build URL for {}", absolute.display()))
        })?;

        info!("Stored avatar at {}", absolute.display());
        Ok(url.to_string())
    }
}
