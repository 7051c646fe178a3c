// ABOUTME: Persists the current session to a TOML file between CLI runs
// ABOUTME: Load, save, and clear operations on ~/.daybook/session.toml

use daybook_core::Session;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::AuthResult;

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session; a missing file is not an error
    pub async fn load(&self) -> AuthResult<Option<Session>> {
        if !self.path.exists() {
            debug!("No session file at {}", self.path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        let session: Session = toml::from_str(&content)?;
        Ok(Some(session))
    }

    pub async fn save(&self, session: &Session) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(session)?;
        fs::write(&self.path, content).await?;
        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    pub async fn clear(&self) -> AuthResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}
