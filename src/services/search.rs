use crate::models::MatchedRecipe;

/// Narrows ranked suggestions by free-text search
///
/// Keeps recipes whose title, description or any ingredient contains the
/// query, case-insensitively. Relative order is preserved and an empty query
/// returns the input untouched.
pub fn search_refine(recipes: Vec<MatchedRecipe>, query: &str) -> Vec<MatchedRecipe> {
    if query.is_empty() {
        return recipes;
    }

    let needle = query.to_lowercase();
    let before = recipes.len();

    let refined: Vec<MatchedRecipe> = recipes
        .into_iter()
        .filter(|r| matches_query(r, &needle))
        .collect();

    tracing::debug!(
        query = %query,
        before,
        after = refined.len(),
        "Refined suggestions by search text"
    );

    refined
}

fn matches_query(matched: &MatchedRecipe, needle: &str) -> bool {
    let recipe = &matched.recipe;
    recipe.title.to_lowercase().contains(needle)
        || recipe.description.to_lowercase().contains(needle)
        || recipe
            .ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(needle))
}
