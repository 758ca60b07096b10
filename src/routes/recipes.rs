use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    cache::CacheKey,
    cached,
    error::{AppError, AppResult},
    models::{filters::lenient_filters, FilterOptions, MatchedRecipe, RatingControl, Recipe},
    services::{match_and_rank, resolve_recipe_image, search_refine, RecipeImage},
};

use super::AppState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    #[serde(default)]
    pub selected_ingredients: Vec<String>,
    #[serde(default, deserialize_with = "lenient_filters")]
    pub filters: FilterOptions,
    /// Free-text refinement applied after ranking
    #[serde(default)]
    pub query: String,
}

impl SuggestRequest {
    /// Cache fingerprint; requests that rank identically share one
    fn fingerprint(&self) -> AppResult<String> {
        let normalized = SuggestRequest {
            selected_ingredients: self
                .selected_ingredients
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            filters: self.filters.clone(),
            query: self.query.to_lowercase(),
        };
        serde_json::to_string(&normalized)
            .map_err(|e| AppError::Internal(format!("Failed to fingerprint request: {}", e)))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    #[serde(flatten)]
    pub suggestion: MatchedRecipe,
    pub match_percentage: u32,
}

impl From<MatchedRecipe> for SuggestionResponse {
    fn from(suggestion: MatchedRecipe) -> Self {
        Self {
            match_percentage: suggestion.match_percentage(),
            suggestion,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub value: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub recipe_id: String,
    #[serde(flatten)]
    pub control: RatingControl,
    pub display_rating: f32,
    pub summary: String,
}

impl RatingResponse {
    fn new(recipe_id: &str, control: RatingControl) -> Self {
        Self {
            recipe_id: recipe_id.to_string(),
            display_rating: control.display_rating(),
            summary: control.summary(),
            control,
        }
    }
}

fn find_recipe<'a>(state: &'a AppState, id: &str) -> AppResult<&'a Recipe> {
    state
        .catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))
}

/// Lists the whole catalog in catalog order
pub async fn list(State(state): State<AppState>) -> Json<Vec<Recipe>> {
    Json(state.catalog.recipes().to_vec())
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Recipe>> {
    let recipe = find_recipe(&state, &id)?;
    Ok(Json(recipe.clone()))
}

async fn ranked_suggestions(
    state: &AppState,
    request: &SuggestRequest,
) -> AppResult<Vec<MatchedRecipe>> {
    let key = CacheKey::Suggestions(request.fingerprint()?);
    cached!(state.cache, key, async {
        let ranked = match_and_rank(
            &request.selected_ingredients,
            &request.filters,
            state.catalog.recipes(),
        );
        Ok::<_, AppError>(search_refine(ranked, &request.query))
    })
}

/// Matches, filters, ranks and search-refines the catalog
pub async fn suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> AppResult<Json<Vec<SuggestionResponse>>> {
    let suggestions = ranked_suggestions(&state, &request).await?;

    tracing::info!(
        selected = request.selected_ingredients.len(),
        filtered = request.filters.has_active_filters(),
        results = suggestions.len(),
        "Suggested recipes"
    );

    Ok(Json(
        suggestions
            .into_iter()
            .map(SuggestionResponse::from)
            .collect(),
    ))
}

pub async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RatingResponse>> {
    let recipe = find_recipe(&state, &id)?;
    let mut control = RatingControl::interactive(recipe.rating, recipe.total_ratings);
    control.user_rating = state.ratings.user_rating(&id).await;
    Ok(Json(RatingResponse::new(&id, control)))
}

pub async fn rate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RatingRequest>,
) -> AppResult<Json<RatingResponse>> {
    let recipe = find_recipe(&state, &id)?;
    let mut control = RatingControl::interactive(recipe.rating, recipe.total_ratings);
    control.rate(request.value)?;

    state.ratings.submit_rating(&id, request.value).await?;

    Ok(Json(RatingResponse::new(&id, control)))
}

pub async fn clear_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RatingResponse>> {
    let recipe = find_recipe(&state, &id)?;
    let control = RatingControl::interactive(recipe.rating, recipe.total_ratings);

    state.ratings.clear_rating(&id).await?;

    Ok(Json(RatingResponse::new(&id, control)))
}

/// Recipe image with placeholder fallback
///
/// Successful lookups are cached per title; placeholders are not.
pub async fn image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RecipeImage>> {
    let recipe = find_recipe(&state, &id)?;
    let key = CacheKey::ImageUrl(recipe.title.clone());

    if let Some(image) = state.cache.get_from_cache::<RecipeImage>(&key).await? {
        tracing::debug!(key = %key, "Cache hit");
        return Ok(Json(image));
    }

    let image = resolve_recipe_image(
        state.image_resolver.as_ref(),
        recipe,
        &state.image_placeholder_url,
        state.image_resolve_timeout,
    )
    .await;

    if image.is_cacheable() {
        state.cache.set(&key, &image).await;
    }

    Ok(Json(image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_ignores_case_and_blanks() {
        let a = SuggestRequest {
            selected_ingredients: vec!["Chicken ".to_string(), "".to_string()],
            query: "Pasta".to_string(),
            ..SuggestRequest::default()
        };
        let b = SuggestRequest {
            selected_ingredients: vec!["chicken".to_string()],
            query: "pasta".to_string(),
            ..SuggestRequest::default()
        };
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn test_fingerprint_distinguishes_filters() {
        let a = SuggestRequest::default();
        let mut b = SuggestRequest::default();
        b.filters.max_cooking_time = 30;
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn test_suggestion_response_carries_percentage() {
        let recipe = crate::catalog::Catalog::builtin().unwrap().get("6").cloned().unwrap();
        let matched = MatchedRecipe::new(recipe, vec!["eggs".to_string()]);
        let value = serde_json::to_value(SuggestionResponse::from(matched)).unwrap();

        assert_eq!(value["id"], "6");
        assert_eq!(value["matchedIngredients"][0], "eggs");
        assert!(value["matchPercentage"].as_u64().unwrap() > 0);
    }
}
