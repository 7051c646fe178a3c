// ABOUTME: Error types for authentication and session operations
// ABOUTME: Covers sign-in failures, session persistence, and auth service responses

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required: please run 'daybook login'")]
    NotAuthenticated,

    #[error("Session expired and could not be refreshed")]
    SessionExpired,

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Auth service error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response from auth service: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session file: {0}")]
    SessionDecode(#[from] toml::de::Error),

    #[error("Failed to encode session: {0}")]
    SessionEncode(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuthError {
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated
                | AuthError::SessionExpired
                | AuthError::InvalidCredentials(_)
        )
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
