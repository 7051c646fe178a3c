// ABOUTME: Session manager orchestrating sign-in, restore, refresh, and sign-out
// ABOUTME: Combines an auth provider with the on-disk session store

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    context::AuthContext,
    error::{AuthError, AuthResult},
    provider::AuthProvider,
    storage::SessionStore,
};

pub struct AuthManager {
    provider: Arc<dyn AuthProvider>,
    store: SessionStore,
}

impl AuthManager {
    pub fn new(provider: Arc<dyn AuthProvider>, store: SessionStore) -> Self {
        Self { provider, store }
    }

    /// Rebuild the auth context from the stored session.
    ///
    /// An expired session is refreshed when it carries a refresh token.
    /// When the auth service rejects the refresh the stored session is
    /// discarded and the context is anonymous. Any other refresh failure is
    /// returned and the stored session is kept for the next attempt.
    pub async fn restore(&self) -> AuthResult<AuthContext> {
        let Some(session) = self.store.load().await? else {
            return Ok(AuthContext::anonymous());
        };

        if session.is_valid() {
            debug!("Restored session for {}", session.user.id);
            return Ok(AuthContext::authenticated(session));
        }

        match self.provider.refresh(&session).await {
            Ok(refreshed) => {
                self.store.save(&refreshed).await?;
                info!("Refreshed session for {}", refreshed.user.id);
                Ok(AuthContext::authenticated(refreshed))
            }
            Err(e) if e.is_auth_error() => {
                warn!("Discarding expired session: {}", e);
                self.store.clear().await?;
                Ok(AuthContext::anonymous())
            }
            Err(e) => {
                warn!("Keeping stored session after failed refresh: {}", e);
                Err(e)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthResult<AuthContext> {
        let session = self.provider.sign_in_with_password(email, password).await?;
        self.store.save(&session).await?;
        Ok(AuthContext::authenticated(session))
    }

    /// Sign up; the context stays anonymous until the e-mail is confirmed
    pub async fn signup(&self, email: &str, password: &str) -> AuthResult<AuthContext> {
        match self.provider.sign_up(email, password).await? {
            Some(session) => {
                self.store.save(&session).await?;
                Ok(AuthContext::authenticated(session))
            }
            None => Ok(AuthContext::anonymous()),
        }
    }

    /// Revoke the session remotely and forget it locally
    pub async fn logout(&self, ctx: AuthContext) -> AuthResult<()> {
        let Some(session) = ctx.into_session() else {
            self.store.clear().await?;
            return Err(AuthError::NotAuthenticated);
        };

        let remote = self.provider.sign_out(&session).await;
        self.store.clear().await?;
        remote
    }
}
