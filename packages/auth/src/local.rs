// ABOUTME: Offline auth provider for the local SQLite backend
// ABOUTME: Issues non-expiring sessions keyed by e-mail address

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use daybook_core::{Session, User};
use tracing::info;

use crate::error::{AuthError, AuthResult};
use crate::provider::AuthProvider;

/// Single-machine auth: the e-mail address is the user id and no password is
/// checked. Only meaningful with the local store, which has no remote access.
#[derive(Debug, Clone, Default)]
pub struct LocalAuth;

impl LocalAuth {
    pub fn new() -> Self {
        Self
    }

    fn session_for(email: &str) -> AuthResult<Session> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "E-mail address is required".to_string(),
            ));
        }

        let far_future = Utc
            .with_ymd_and_hms(9999, 12, 31, 0, 0, 0)
            .single()
            .ok_or_else(|| AuthError::Configuration("Invalid session expiry".to_string()))?;

        Ok(Session {
            access_token: format!("local-{}", email),
            refresh_token: None,
            expires_at: far_future,
            user: User {
                id: email.to_lowercase(),
                email: Some(email.to_string()),
            },
        })
    }
}

#[async_trait]
impl AuthProvider for LocalAuth {
    async fn sign_in_with_password(&self, email: &str, _password: &str) -> AuthResult<Session> {
        let session = Self::session_for(email)?;
        info!("Started local session for {}", session.user.id);
        Ok(session)
    }

    async fn sign_up(&self, email: &str, _password: &str) -> AuthResult<Option<Session>> {
        Self::session_for(email).map(Some)
    }

    async fn refresh(&self, session: &Session) -> AuthResult<Session> {
        Ok(session.clone())
    }

    async fn sign_out(&self, _session: &Session) -> AuthResult<()> {
        Ok(())
    }
}
