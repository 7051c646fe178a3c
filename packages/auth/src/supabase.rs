// ABOUTME: Supabase GoTrue client for password sign-in and token refresh
// ABOUTME: Maps GoTrue token responses onto Daybook sessions

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use daybook_config::SupabaseConfig;
use daybook_core::{Session, User};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AuthError, AuthResult};
use crate::provider::AuthProvider;

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: GoTrueUser,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// GoTrue has used several error body shapes across versions
#[derive(Debug, Default, Deserialize)]
struct GoTrueError {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl GoTrueError {
    fn into_message(self, status: StatusCode) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
            .unwrap_or_else(|| status.to_string())
    }
}

impl TokenResponse {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(|| now + Duration::seconds(self.expires_in.unwrap_or(3600)));

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: User {
                id: self.user.id,
                email: self.user.email,
            },
        }
    }
}

/// Auth provider backed by a Supabase project's GoTrue endpoints
#[derive(Clone)]
pub struct SupabaseAuth {
    http_client: Client,
    project_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(config: &SupabaseConfig, timeout: std::time::Duration) -> AuthResult<Self> {
        if config.url.is_empty() || config.anon_key.is_empty() {
            return Err(AuthError::Configuration(
                "Supabase URL and anonymous key are required".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            project_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn token_url(&self, grant_type: &str) -> String {
        format!(
            "{}/auth/v1/token?grant_type={}",
            self.project_url,
            urlencoding::encode(grant_type)
        )
    }

    async fn error_from(response: Response) -> AuthError {
        let status = response.status();
        let body: GoTrueError = response.json().await.unwrap_or_default();
        let message = body.into_message(status);

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
                AuthError::InvalidCredentials(message)
            }
            _ => AuthError::Provider {
                status: status.as_u16(),
                message,
            },
        }
    }

    async fn token_request<B: Serialize + ?Sized>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> AuthResult<Session> {
        let response = self
            .http_client
            .post(self.token_url(grant_type))
            .header("apikey", &self.anon_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
        Ok(token.into_session(Utc::now()))
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session> {
        debug!("Signing in {}", email);
        let session = self
            .token_request("password", &PasswordGrant { email, password })
            .await?;
        info!("Signed in as {}", session.user.id);
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Option<Session>> {
        debug!("Signing up {}", email);
        let response = self
            .http_client
            .post(format!("{}/auth/v1/signup", self.project_url))
            .header("apikey", &self.anon_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        // With e-mail confirmation enabled the body is the bare user object
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
        if body.get("access_token").is_none() {
            info!("Sign-up for {} awaits e-mail confirmation", email);
            return Ok(None);
        }

        let token: TokenResponse = serde_json::from_value(body)?;
        Ok(Some(token.into_session(Utc::now())))
    }

    async fn refresh(&self, session: &Session) -> AuthResult<Session> {
        let refresh_token = session
            .refresh_token
            .as_deref()
            .ok_or(AuthError::SessionExpired)?;

        debug!("Refreshing session for {}", session.user.id);
        self.token_request("refresh_token", &RefreshGrant { refresh_token })
            .await
            .map_err(|e| {
                warn!("Session refresh failed: {}", e);
                match e {
                    AuthError::InvalidCredentials(_) => AuthError::SessionExpired,
                    other => other,
                }
            })
    }

    async fn sign_out(&self, session: &Session) -> AuthResult<()> {
        let response = self
            .http_client
            .post(format!("{}/auth/v1/logout", self.project_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        // 401 here means the token was already revoked
        if response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED {
            info!("Signed out {}", session.user.id);
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }
}
