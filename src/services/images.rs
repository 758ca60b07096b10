use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::Recipe,
    services::providers::{GeneratedImage, ImageGenerator, ImageOptions, ImageResolver},
};

/// Number of leading ingredients mentioned in a generated prompt
const PROMPT_INGREDIENT_COUNT: usize = 3;

/// Builds the food-photography prompt for a recipe
pub fn recipe_image_prompt(title: &str, ingredients: &[String]) -> String {
    let main_ingredients = ingredients
        .iter()
        .take(PROMPT_INGREDIENT_COUNT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Professional food photography of {}, featuring {}. \
         Beautifully plated dish with vibrant colors, appetizing presentation, \
         natural lighting, shallow depth of field, restaurant quality, \
         clean background, high resolution, mouth-watering, \
         professional culinary photography style",
        title, main_ingredients
    )
}

/// Where a recipe's image URL came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// The catalog entry carries its own image
    Catalog,
    Resolved,
    Placeholder,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeImage {
    pub url: String,
    pub source: ImageSource,
}

impl RecipeImage {
    pub fn placeholder(url: &str) -> Self {
        Self {
            url: url.to_string(),
            source: ImageSource::Placeholder,
        }
    }

    /// Placeholders are not worth remembering, the next lookup may succeed
    pub fn is_cacheable(&self) -> bool {
        self.source != ImageSource::Placeholder
    }
}

/// Picks the image to show for a recipe
///
/// Never fails: a resolver that has nothing, errors out, or takes longer than
/// `timeout` yields the placeholder.
pub async fn resolve_recipe_image(
    resolver: &dyn ImageResolver,
    recipe: &Recipe,
    placeholder: &str,
    timeout: Duration,
) -> RecipeImage {
    if let Some(url) = recipe.image.as_ref().filter(|url| !url.trim().is_empty()) {
        return RecipeImage {
            url: url.clone(),
            source: ImageSource::Catalog,
        };
    }

    let lookup = resolver.resolve_image_url(&recipe.title, &recipe.ingredients);
    match tokio::time::timeout(timeout, lookup).await {
        Ok(Ok(Some(url))) => RecipeImage {
            url,
            source: ImageSource::Resolved,
        },
        Ok(Ok(None)) => {
            tracing::debug!(title = %recipe.title, resolver = resolver.name(), "No image found");
            RecipeImage::placeholder(placeholder)
        }
        Ok(Err(e)) => {
            tracing::warn!(
                title = %recipe.title,
                resolver = resolver.name(),
                error = %e,
                "Image lookup failed, using placeholder"
            );
            RecipeImage::placeholder(placeholder)
        }
        Err(_) => {
            tracing::warn!(
                title = %recipe.title,
                resolver = resolver.name(),
                timeout_ms = timeout.as_millis() as u64,
                "Image lookup timed out, using placeholder"
            );
            RecipeImage::placeholder(placeholder)
        }
    }
}

/// Generates a new image for a recipe with the caller's provider key
///
/// A non-blank `custom_prompt` replaces the prompt derived from the recipe.
pub async fn generate_recipe_image(
    generator: &dyn ImageGenerator,
    api_key: Option<&str>,
    title: &str,
    ingredients: &[String],
    custom_prompt: Option<&str>,
) -> AppResult<GeneratedImage> {
    let api_key = api_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            AppError::InvalidInput(
                "API key required to generate images. Enter your image provider key and try again."
                    .to_string(),
            )
        })?;

    let prompt = match custom_prompt.map(str::trim).filter(|p| !p.is_empty()) {
        Some(prompt) => prompt.to_string(),
        None => recipe_image_prompt(title, ingredients),
    };

    tracing::info!(title = %title, generator = generator.name(), "Generating recipe image");
    generator
        .generate_image(api_key, &prompt, &ImageOptions::default())
        .await
}
