/// External collaborator abstractions
///
/// The core never talks to identity, image or rating backends directly. Each
/// backend sits behind one of these traits so the service degrades to a safe
/// state (guest mode, placeholder image, local rating) when it is missing or
/// failing.
use thiserror::Error;

use crate::{
    error::AppResult,
    models::{RatingError, Session},
};

pub mod curated_images;
pub mod guest;
pub mod local_ratings;
pub mod runware;
pub mod supabase;

pub use curated_images::CuratedImageResolver;
pub use guest::GuestOnlyAuthProvider;
pub use local_ratings::LocalRatingService;
pub use runware::RunwareImageGenerator;
pub use supabase::SupabaseAuthProvider;

/// Error types for the identity provider
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Rejected(String),
    #[error("Authentication is not configured")]
    NotConfigured,
    #[error("Identity provider unreachable: {0}")]
    Http(#[from] reqwest::Error),
}

/// Identity provider exposing email/password accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Revokes the session's token, if it has one
    async fn sign_out(&self, session: &Session) -> Result<(), AuthError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Looks up an existing image for a recipe
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ImageResolver: Send + Sync {
    /// Returns `None` when the resolver has nothing for this recipe
    async fn resolve_image_url(
        &self,
        title: &str,
        ingredients: &[String],
    ) -> AppResult<Option<String>>;

    fn name(&self) -> &'static str;
}

/// Output shape and model for image generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOptions {
    pub width: u32,
    pub height: u32,
    pub model: String,
    pub output_format: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            model: "runware:100@1".to_string(),
            output_format: "WEBP".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GeneratedImage {
    pub url: String,
}

/// Text-to-image backend, authenticated with a caller-supplied key
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(
        &self,
        api_key: &str,
        prompt: &str,
        options: &ImageOptions,
    ) -> AppResult<GeneratedImage>;

    fn name(&self) -> &'static str;
}

/// Destination for user ratings
///
/// Nothing here aggregates ratings or writes them back to the catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingService: Send + Sync {
    async fn submit_rating(&self, recipe_id: &str, value: u8) -> Result<(), RatingError>;

    async fn clear_rating(&self, recipe_id: &str) -> Result<(), RatingError>;

    async fn user_rating(&self, recipe_id: &str) -> Option<u8>;

    fn name(&self) -> &'static str;
}
