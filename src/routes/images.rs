use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    services::{generate_recipe_image, providers::GeneratedImage},
};

use super::AppState;

/// Either a catalog recipe id or an explicit title and ingredient list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub recipe_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Caller's key for the image provider, never stored
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> AppResult<Json<GeneratedImage>> {
    let (title, ingredients) = match (&request.recipe_id, &request.title) {
        (Some(id), _) => {
            let recipe = state
                .catalog
                .get(id)
                .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))?;
            (recipe.title.clone(), recipe.ingredients.clone())
        }
        (None, Some(title)) if !title.trim().is_empty() => {
            (title.trim().to_string(), request.ingredients.clone())
        }
        _ => {
            return Err(AppError::InvalidInput(
                "Either recipeId or title is required".to_string(),
            ))
        }
    };

    let image = generate_recipe_image(
        state.image_generator.as_ref(),
        request.api_key.as_deref(),
        &title,
        &ingredients,
        request.prompt.as_deref(),
    )
    .await?;

    Ok(Json(image))
}
