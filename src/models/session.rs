use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub email: Option<String>,
}

/// Result of a successful sign-up or sign-in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user: UserInfo,
    /// Absent when the provider still requires email confirmation
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_confirmed(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Current-session observable value
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

impl SessionState {
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn guest() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn signed_in(user: UserInfo) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn access(&self) -> AccessLevel {
        match (self.loading, &self.user) {
            (true, _) => AccessLevel::Loading,
            (false, None) => AccessLevel::Guest,
            (false, Some(_)) => AccessLevel::Authenticated,
        }
    }
}

/// What the front-end may unlock for the current session
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Session lookup pending, authenticated-only sections stay locked
    Loading,
    Guest,
    Authenticated,
}
