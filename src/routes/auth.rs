use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{AccessLevel, Session, SessionState},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    fn validate(&self) -> AppResult<(&str, &str)> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(AppError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }
        Ok((email, &self.password))
    }
}

/// Token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(flatten)]
    pub state: SessionState,
    pub access: AccessLevel,
    /// Bearer token for later requests, only sent when a session is created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl From<SessionState> for SessionResponse {
    fn from(state: SessionState) -> Self {
        Self {
            access: state.access(),
            state,
            access_token: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub session: Session,
    /// False while the provider waits for the email to be confirmed
    pub confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

pub async fn sign_up(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Json<SignUpResponse>> {
    let (email, password) = credentials.validate()?;
    let session = state.auth.sign_up(email, password).await?;
    Ok(Json(SignUpResponse {
        confirmed: session.is_confirmed(),
        access_token: session.access_token.clone(),
        session,
    }))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Json<SessionResponse>> {
    let (email, password) = credentials.validate()?;
    let session = state.auth.sign_in(email, password).await?;

    let signed_in = state.auth.state(session.access_token.as_deref()).await;
    let mut response = SessionResponse::from(signed_in);
    response.access_token = session.access_token;
    Ok(Json(response))
}

/// Ends the caller's session; other clients stay signed in
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Json<SessionResponse> {
    let token = bearer_token(&headers);
    state.auth.sign_out(token).await;
    Json(state.auth.state(None).await.into())
}

pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> Json<SessionResponse> {
    Json(state.auth.state(bearer_token(&headers)).await.into())
}
