// ABOUTME: Auth provider trait implemented by the hosted and offline backends
// ABOUTME: Sign in, sign up, refresh and sign out, each yielding explicit sessions

use async_trait::async_trait;
use daybook_core::Session;

use crate::error::AuthResult;

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session>;

    /// Returns `None` when the service requires e-mail confirmation first
    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Option<Session>>;

    async fn refresh(&self, session: &Session) -> AuthResult<Session>;

    async fn sign_out(&self, session: &Session) -> AuthResult<()>;
}
