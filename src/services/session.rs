use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{watch, RwLock};

use crate::{
    models::{Session, SessionState},
    services::providers::{AuthError, AuthProvider},
};

/// A signed-in client, keyed by its access token
struct ActiveSession {
    session: Session,
    state_tx: watch::Sender<SessionState>,
}

impl ActiveSession {
    fn is_expired(&self) -> bool {
        self.session
            .expires_at
            .is_some_and(|expires_at| expires_at <= Utc::now())
    }
}

/// Tracks signed-in clients and publishes their session changes
///
/// Every client is identified by the bearer token it received at sign-in;
/// a request without a known token is a guest. The anonymous state starts
/// as loading and stays that way until `mark_ready` is called, so
/// authenticated-only views stay locked until the first lookup has settled.
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    anonymous_tx: watch::Sender<SessionState>,
    sessions: RwLock<HashMap<String, ActiveSession>>,
}

impl AuthService {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let (anonymous_tx, _) = watch::channel(SessionState::loading());
        Self {
            provider,
            anonymous_tx,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    fn is_loading(&self) -> bool {
        self.anonymous_tx.borrow().loading
    }

    /// Receiver that observes every change to the session behind `token`
    ///
    /// Unknown or missing tokens observe the anonymous state.
    pub async fn subscribe(&self, token: Option<&str>) -> watch::Receiver<SessionState> {
        if let Some(token) = token {
            if let Some(active) = self.sessions.read().await.get(token) {
                return active.state_tx.subscribe();
            }
        }
        self.anonymous_tx.subscribe()
    }

    /// Session state as seen by the client holding `token`
    pub async fn state(&self, token: Option<&str>) -> SessionState {
        if self.is_loading() {
            return SessionState::loading();
        }
        let Some(token) = token else {
            return SessionState::guest();
        };

        let mut sessions = self.sessions.write().await;
        let Some(active) = sessions.get(token) else {
            return SessionState::guest();
        };
        if !active.is_expired() {
            return SessionState::signed_in(active.session.user.clone());
        }

        if let Some(expired) = sessions.remove(token) {
            tracing::info!(user_id = %expired.session.user.id, "Session expired");
            expired.state_tx.send_replace(SessionState::guest());
        }
        SessionState::guest()
    }

    /// Ends the initial loading phase
    pub fn mark_ready(&self) {
        self.anonymous_tx.send_modify(|state| state.loading = false);
    }

    /// Registers a new account
    ///
    /// When the provider still wants the email confirmed the returned session
    /// carries no token and nothing is established.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self
            .provider
            .sign_up(email, password)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Sign up failed"))?;

        if session.is_confirmed() {
            self.establish(session.clone()).await;
        } else {
            tracing::info!(user_id = %session.user.id, "Sign up awaiting email confirmation");
        }
        Ok(session)
    }

    /// Signs in; on failure no session changes so the user can retry
    ///
    /// The returned session's access token identifies the caller from now on.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self
            .provider
            .sign_in(email, password)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Sign in failed"))?;

        if !session.is_confirmed() {
            return Err(AuthError::Rejected(
                "Identity provider returned no access token".to_string(),
            ));
        }

        self.establish(session.clone()).await;
        Ok(session)
    }

    /// Returns the client holding `token` to guest mode
    ///
    /// The local session is dropped even if the provider cannot revoke the
    /// token. Other clients are unaffected.
    pub async fn sign_out(&self, token: Option<&str>) {
        let Some(token) = token else {
            return;
        };
        let Some(active) = self.sessions.write().await.remove(token) else {
            return;
        };

        let session = active.session;
        if let Err(e) = self.provider.sign_out(&session).await {
            tracing::warn!(user_id = %session.user.id, error = %e, "Token revocation failed");
        }
        tracing::info!(user_id = %session.user.id, "Signed out");

        active.state_tx.send_replace(SessionState::guest());
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn establish(&self, session: Session) {
        let Some(token) = session.access_token.clone() else {
            return;
        };
        let (state_tx, _) = watch::channel(SessionState::signed_in(session.user.clone()));
        tracing::info!(user_id = %session.user.id, "Signed in");
        self.sessions
            .write()
            .await
            .insert(token, ActiveSession { session, state_tx });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccessLevel, UserInfo};
    use crate::services::providers::MockAuthProvider;
    use chrono::Duration;

    fn session(id: &str, token: Option<&str>) -> Session {
        Session {
            user: UserInfo {
                id: id.to_string(),
                email: Some(format!("{}@example.com", id)),
            },
            access_token: token.map(str::to_string),
            expires_at: None,
        }
    }

    fn ready(provider: MockAuthProvider) -> AuthService {
        let service = AuthService::new(Arc::new(provider));
        service.mark_ready();
        service
    }

    #[tokio::test]
    async fn test_starts_loading_until_ready() {
        let service = AuthService::new(Arc::new(MockAuthProvider::new()));
        assert_eq!(service.state(None).await.access(), AccessLevel::Loading);

        service.mark_ready();
        assert_eq!(service.state(None).await.access(), AccessLevel::Guest);
    }

    #[tokio::test]
    async fn test_sign_in_is_scoped_to_token() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_in()
            .returning(|_, _| Ok(session("alice", Some("alice-jwt"))));
        let service = ready(provider);

        let signed_in = service.sign_in("alice@example.com", "secret").await.unwrap();
        let token = signed_in.access_token.as_deref();

        let state = service.state(token).await;
        assert_eq!(state.access(), AccessLevel::Authenticated);
        assert_eq!(state.user.unwrap().id, "alice");

        assert_eq!(service.state(None).await, SessionState::guest());
        assert_eq!(
            service.state(Some("someone-else")).await,
            SessionState::guest()
        );
    }

    #[tokio::test]
    async fn test_sign_out_is_observed_by_subscriber() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_in()
            .returning(|_, _| Ok(session("alice", Some("alice-jwt"))));
        provider.expect_sign_out().returning(|_| Ok(()));
        let service = ready(provider);

        service.sign_in("alice@example.com", "secret").await.unwrap();
        let mut rx = service.subscribe(Some("alice-jwt")).await;
        assert_eq!(rx.borrow().access(), AccessLevel::Authenticated);

        service.sign_out(Some("alice-jwt")).await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionState::guest());
    }

    #[tokio::test]
    async fn test_failed_sign_in_keeps_state() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_in()
            .returning(|_, _| Err(AuthError::InvalidCredentials));
        let service = ready(provider);

        let result = service.sign_in("cook@example.com", "wrong").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(service.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn test_sign_in_without_token_is_rejected() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_in()
            .returning(|_, _| Ok(session("alice", None)));
        let service = ready(provider);

        let result = service.sign_in("alice@example.com", "secret").await;
        assert!(matches!(result, Err(AuthError::Rejected(_))));
        assert_eq!(service.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn test_unconfirmed_sign_up_stays_guest() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_up()
            .returning(|_, _| Ok(session("cook", None)));
        let service = ready(provider);

        let created = service.sign_up("cook@example.com", "secret").await.unwrap();
        assert!(!created.is_confirmed());
        assert_eq!(service.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn test_expired_session_reads_as_guest() {
        let mut provider = MockAuthProvider::new();
        provider.expect_sign_in().returning(|_, _| {
            let mut expired = session("alice", Some("alice-jwt"));
            expired.expires_at = Some(Utc::now() - Duration::minutes(1));
            Ok(expired)
        });
        let service = ready(provider);

        service.sign_in("alice@example.com", "secret").await.unwrap();
        assert_eq!(
            service.state(Some("alice-jwt")).await,
            SessionState::guest()
        );
        assert_eq!(service.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn test_sign_out_only_ends_own_session() {
        let mut provider = MockAuthProvider::new();
        provider.expect_sign_in().returning(|email, _| {
            let id = email.split('@').next().unwrap_or_default();
            Ok(session(id, Some(format!("{}-jwt", id).as_str())))
        });
        provider
            .expect_sign_out()
            .times(1)
            .returning(|_| Err(AuthError::Rejected("token expired".to_string())));
        let service = ready(provider);

        service.sign_in("alice@example.com", "secret").await.unwrap();
        service.sign_in("bob@example.com", "secret").await.unwrap();

        service.sign_out(Some("bob-jwt")).await;

        assert_eq!(service.state(Some("bob-jwt")).await, SessionState::guest());
        assert_eq!(
            service.state(Some("alice-jwt")).await.access(),
            AccessLevel::Authenticated
        );
    }

    #[tokio::test]
    async fn test_sign_out_without_session_skips_provider() {
        let mut provider = MockAuthProvider::new();
        provider.expect_sign_out().never();
        let service = ready(provider);

        service.sign_out(None).await;
        service.sign_out(Some("unknown")).await;
        assert_eq!(service.state(None).await.access(), AccessLevel::Guest);
    }
}
