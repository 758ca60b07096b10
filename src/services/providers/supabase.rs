/// Supabase (GoTrue) identity provider
///
/// API Flow:
/// 1. Sign up: POST /auth/v1/signup → session, or a bare user when email
///    confirmation is pending
/// 2. Sign in: POST /auth/v1/token?grant_type=password → session
/// 3. Sign out: POST /auth/v1/logout with the access token
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::{Session, UserInfo},
    services::providers::{AuthError, AuthProvider},
};

#[derive(Clone)]
pub struct SupabaseAuthProvider {
    http_client: HttpClient,
    api_url: String,
    api_key: String,
}

/// User object as returned by GoTrue
#[derive(Debug, Deserialize)]
struct ApiUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Either a full session or, for unconfirmed sign-ups, the user fields inline
#[derive(Debug, Deserialize)]
struct ApiAuthResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    user: Option<ApiUser>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiAuthError {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl SupabaseAuthProvider {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn post_credentials(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: ApiAuthResponse = response.json().await?;
        session_from_response(body, Utc::now())
    }
}

async fn check_status(response: Response) -> Result<Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: ApiAuthError = response.json().await.unwrap_or_default();
    tracing::warn!(status = %status, "Identity provider rejected request");
    Err(auth_error_from(status, body))
}

fn auth_error_from(status: StatusCode, body: ApiAuthError) -> AuthError {
    let message = body.error_description.or(body.msg).or(body.message);
    match (status, message) {
        (StatusCode::BAD_REQUEST, Some(msg)) if msg.to_lowercase().contains("invalid login") => {
            AuthError::InvalidCredentials
        }
        (_, Some(msg)) => AuthError::Rejected(msg),
        (status, None) => AuthError::Rejected(format!("Identity provider returned status {}", status)),
    }
}

fn session_from_response(body: ApiAuthResponse, now: DateTime<Utc>) -> Result<Session, AuthError> {
    let user = match (body.user, body.id) {
        (Some(user), _) => UserInfo {
            id: user.id,
            email: user.email,
        },
        (None, Some(id)) => UserInfo {
            id,
            email: body.email,
        },
        (None, None) => {
            return Err(AuthError::Rejected(
                "Identity provider response did not include a user".to_string(),
            ))
        }
    };

    let expires_at = body
        .access_token
        .as_ref()
        .and(body.expires_in)
        .and_then(Duration::try_seconds)
        .map(|lifetime| now + lifetime);

    Ok(Session {
        user,
        access_token: body.access_token,
        expires_at,
    })
}

#[async_trait::async_trait]
impl AuthProvider for SupabaseAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.post_credentials("/auth/v1/signup", email, password).await?;
        tracing::info!(
            user_id = %session.user.id,
            confirmed = session.is_confirmed(),
            "Account created"
        );
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self
            .post_credentials("/auth/v1/token?grant_type=password", email, password)
            .await?;
        tracing::info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        let Some(token) = &session.access_token else {
            return Ok(());
        };

        let url = format!("{}/auth/v1/logout", self.api_url);
        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "supabase"
    }
}
