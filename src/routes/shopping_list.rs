use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{models::ShoppingListEntry, services::build_shopping_list};

use super::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListRequest {
    #[serde(default)]
    pub recipe_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListResponse {
    /// Recipes that contributed, unknown ids are skipped
    pub recipe_ids: Vec<String>,
    pub entries: Vec<ShoppingListEntry>,
}

/// Aggregated ingredients for the selected recipes
pub async fn build(
    State(state): State<AppState>,
    Json(request): Json<ShoppingListRequest>,
) -> Json<ShoppingListResponse> {
    let recipes = state.catalog.select(&request.recipe_ids);
    let recipe_ids: Vec<String> = recipes.iter().map(|r| r.id.clone()).collect();
    let entries = build_shopping_list(recipes);

    tracing::info!(
        recipes = recipe_ids.len(),
        entries = entries.len(),
        "Built shopping list"
    );

    Json(ShoppingListResponse {
        recipe_ids,
        entries,
    })
}
