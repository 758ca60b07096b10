use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{
    models::{rating::validate_rating, RatingError},
    services::providers::RatingService,
};

/// Keeps the user's ratings in memory for the lifetime of the process
///
/// Stands in for a real rating-aggregation backend: values are validated and
/// remembered so the UI can show them, but aggregates are never updated.
#[derive(Debug, Default)]
pub struct LocalRatingService {
    ratings: RwLock<HashMap<String, u8>>,
}

impl LocalRatingService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RatingService for LocalRatingService {
    async fn submit_rating(&self, recipe_id: &str, value: u8) -> Result<(), RatingError> {
        let value = validate_rating(value)?;
        self.ratings
            .write()
            .await
            .insert(recipe_id.to_string(), value);
        tracing::info!(recipe_id = %recipe_id, value, "Rating recorded locally");
        Ok(())
    }

    async fn clear_rating(&self, recipe_id: &str) -> Result<(), RatingError> {
        self.ratings.write().await.remove(recipe_id);
        Ok(())
    }

    async fn user_rating(&self, recipe_id: &str) -> Option<u8> {
        self.ratings.read().await.get(recipe_id).copied()
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
