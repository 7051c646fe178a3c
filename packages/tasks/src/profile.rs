// ABOUTME: Profile reads, upserts, and avatar uploads for the signed-in user
// ABOUTME: Uploaded avatar URLs are written back onto the profile row

use daybook_auth::AuthContext;
use daybook_core::{file_extension, Profile, ProfileUpdate, Session};
use daybook_storage::{avatar_object_path, content_type_for, AvatarStore, ProfileStore};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{TaskError, TaskResult};

const DEFAULT_AVATAR_EXTENSION: &str = "png";

#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
    avatars: Arc<dyn AvatarStore>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileStore>, avatars: Arc<dyn AvatarStore>) -> Self {
        Self { profiles, avatars }
    }

    fn session(ctx: &AuthContext) -> TaskResult<&Session> {
        ctx.require().map_err(|_| TaskError::AuthenticationRequired)
    }

    pub async fn get(&self, ctx: &AuthContext) -> TaskResult<Option<Profile>> {
        let session = Self::session(ctx)?;
        debug!("Fetching profile for {}", session.user_id());
        Ok(self.profiles.get_profile(session).await?)
    }

    pub async fn update(&self, ctx: &AuthContext, update: ProfileUpdate) -> TaskResult<Profile> {
        let session = Self::session(ctx)?;
        let profile = self.profiles.upsert_profile(session, &update).await?;
        info!("Profile updated for {}", session.user_id());
        Ok(profile)
    }

    /// Upload `bytes` as the user's avatar and return its URL
    pub async fn upload_avatar(
        &self,
        ctx: &AuthContext,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> TaskResult<String> {
        let session = Self::session(ctx)?;
        let extension = file_extension(file_name, DEFAULT_AVATAR_EXTENSION);
        let object_path = avatar_object_path(session.user_id(), &extension);
        let content_type = content_type_for(&extension);

        let url = self
            .avatars
            .upload_avatar(session, &object_path, content_type.essence_str(), bytes)
            .await?;

        self.profiles
            .upsert_profile(
                session,
                &ProfileUpdate {
                    avatar_url: Some(url.clone()),
                    ..Default::default()
                },
            )
            .await?;

        info!("Avatar uploaded to {}", object_path);
        Ok(url)
    }
}
