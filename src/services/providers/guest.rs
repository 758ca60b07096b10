use crate::{
    models::Session,
    services::providers::{AuthError, AuthProvider},
};

/// Used when no identity provider is configured
///
/// Every account operation fails with `NotConfigured`, leaving the session
/// in guest mode.
#[derive(Debug, Clone, Default)]
pub struct GuestOnlyAuthProvider;

#[async_trait::async_trait]
impl AuthProvider for GuestOnlyAuthProvider {
    async fn sign_up(&self, _email: &str, _password: &str) -> Result<Session, AuthError> {
        Err(AuthError::NotConfigured)
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Session, AuthError> {
        Err(AuthError::NotConfigured)
    }

    async fn sign_out(&self, _session: &Session) -> Result<(), AuthError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "guest"
    }
}
