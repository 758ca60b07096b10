use std::sync::Arc;
use std::time::Duration;

use crate::{
    cache::Cache,
    catalog::Catalog,
    config::Config,
    services::{
        providers::{
            AuthProvider, CuratedImageResolver, GuestOnlyAuthProvider, ImageGenerator,
            ImageResolver, LocalRatingService, RatingService, RunwareImageGenerator,
            SupabaseAuthProvider,
        },
        AuthService,
    },
};

/// Shared application state
///
/// The catalog is read-only after start-up; everything mutable lives behind
/// its own lock inside the individual services.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub cache: Cache,
    pub auth: Arc<AuthService>,
    pub image_resolver: Arc<dyn ImageResolver>,
    pub image_generator: Arc<dyn ImageGenerator>,
    pub ratings: Arc<dyn RatingService>,
    pub image_placeholder_url: String,
    pub image_resolve_timeout: Duration,
}

impl AppState {
    /// Wires the production collaborators described by `config`
    ///
    /// Without both `AUTH_URL` and `AUTH_API_KEY` the service runs guest-only.
    pub fn from_config(config: &Config, catalog: Catalog) -> Self {
        let auth_provider: Arc<dyn AuthProvider> =
            match (config.auth_url.as_deref(), config.auth_api_key.as_deref()) {
                (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Arc::new(
                    SupabaseAuthProvider::new(url.to_string(), key.to_string()),
                ),
                _ => Arc::new(GuestOnlyAuthProvider),
            };

        tracing::info!(
            auth_provider = auth_provider.name(),
            recipes = catalog.len(),
            "Application state initialized"
        );

        Self {
            catalog: Arc::new(catalog),
            cache: Cache::new(config.suggestion_cache_capacity),
            auth: Arc::new(AuthService::new(auth_provider)),
            image_resolver: Arc::new(CuratedImageResolver::new()),
            image_generator: Arc::new(RunwareImageGenerator::new(config.image_api_url.clone())),
            ratings: Arc::new(LocalRatingService::new()),
            image_placeholder_url: config.image_placeholder_url.clone(),
            image_resolve_timeout: Duration::from_millis(config.image_resolve_timeout_ms),
        }
    }
}
