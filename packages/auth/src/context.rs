// ABOUTME: Explicit authentication context passed to every store operation
// ABOUTME: Replaces process-wide session state with a value callers thread through

use daybook_core::{Session, User};

use crate::error::{AuthError, AuthResult};

/// The caller's identity for one operation.
///
/// An expired session behaves exactly like no session: every accessor
/// reports the context as anonymous.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    session: Option<Session>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { session: None }
    }

    pub fn authenticated(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// The session, if one is present and not expired
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref().filter(|s| s.is_valid())
    }

    /// The session or `NotAuthenticated`
    pub fn require(&self) -> AuthResult<&Session> {
        self.session().ok_or(AuthError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.session().map(|s| &s.user)
    }

    pub fn into_session(self) -> Option<Session> {
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn session(expires_in: Duration) -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: None,
            expires_at: Utc::now() + expires_in,
            user: User {
                id: "user-1".to_string(),
                email: Some("test@example.com".to_string()),
            },
        }
    }

    #[test]
    fn test_anonymous_requires_login() {
        let ctx = AuthContext::anonymous();
        assert!(!ctx.is_authenticated());
        assert!(matches!(ctx.require(), Err(AuthError::NotAuthenticated)));
    }

    #[test]
    fn test_valid_session_is_returned() {
        let ctx = AuthContext::authenticated(session(Duration::hours(1)));
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.require().unwrap().user_id(), "user-1");
        assert_eq!(ctx.user().unwrap().email.as_deref(), Some("test@example.com"));
    }

    #[test]
    fn test_expired_session_fails_closed() {
        let ctx = AuthContext::authenticated(session(-Duration::minutes(5)));
        assert!(!ctx.is_authenticated());
        assert!(ctx.user().is_none());
        assert!(ctx.require().is_err());
    }
}
