use crate::models::{FilterOptions, MatchedRecipe, Recipe, SortBy};

/// Matches, filters and ranks catalog recipes against the user's ingredients
///
/// Every recipe is annotated with the ingredients the user already has, then
/// the recipes failing any filter are dropped and the rest are ordered by
/// `filters.sort_by`. The sort is stable, so ties keep catalog order.
///
/// An empty selection is not special-cased: every recipe simply has zero
/// matched ingredients and the filters and sort still apply. Blank entries in
/// `selected_ingredients` are ignored.
pub fn match_and_rank(
    selected_ingredients: &[String],
    filters: &FilterOptions,
    catalog: &[Recipe],
) -> Vec<MatchedRecipe> {
    let selected: Vec<String> = selected_ingredients
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let mut results: Vec<MatchedRecipe> = catalog
        .iter()
        .filter(|recipe| passes_filters(recipe, filters))
        .map(|recipe| {
            let matched = matched_ingredients(recipe, &selected);
            MatchedRecipe::new(recipe.clone(), matched)
        })
        .collect();

    sort_recipes(&mut results, filters.sort_by);

    tracing::debug!(
        selected = selected.len(),
        catalog = catalog.len(),
        results = results.len(),
        sort_by = filters.sort_by.as_str(),
        "Ranked recipe suggestions"
    );

    results
}

/// Lenient containment: either lower-cased string contains the other
pub fn is_fuzzy_match(selected: &str, ingredient: &str) -> bool {
    let selected = selected.to_lowercase();
    let ingredient = ingredient.to_lowercase();
    contains_either(&selected, &ingredient)
}

fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Recipe ingredients covered by the (already lower-cased) selection, in recipe order
fn matched_ingredients(recipe: &Recipe, selected_lower: &[String]) -> Vec<String> {
    recipe
        .ingredients
        .iter()
        .filter(|ingredient| {
            let ingredient = ingredient.to_lowercase();
            selected_lower
                .iter()
                .any(|selected| contains_either(selected, &ingredient))
        })
        .cloned()
        .collect()
}

/// All filter predicates combined
pub fn passes_filters(recipe: &Recipe, filters: &FilterOptions) -> bool {
    within_cooking_time(recipe, filters)
        && matches_difficulty(recipe, filters)
        && meets_any_serving_threshold(recipe, filters)
        && satisfies_all_dietary_restrictions(recipe, filters)
}

fn within_cooking_time(recipe: &Recipe, filters: &FilterOptions) -> bool {
    recipe.cooking_time <= filters.effective_max_cooking_time()
}

fn matches_difficulty(recipe: &Recipe, filters: &FilterOptions) -> bool {
    filters.difficulty.is_empty() || filters.difficulty.contains(&recipe.difficulty)
}

// Each threshold means "at least this many servings", any one suffices
fn meets_any_serving_threshold(recipe: &Recipe, filters: &FilterOptions) -> bool {
    filters.servings.is_empty()
        || filters
            .servings
            .iter()
            .any(|threshold| recipe.servings >= *threshold)
}

fn satisfies_all_dietary_restrictions(recipe: &Recipe, filters: &FilterOptions) -> bool {
    filters
        .dietary_restrictions
        .iter()
        .all(|tag| recipe.has_dietary_tag(tag))
}

/// Stable sort by the requested order
pub fn sort_recipes(recipes: &mut [MatchedRecipe], sort_by: SortBy) {
    match sort_by {
        SortBy::Match => recipes.sort_by(|a, b| b.match_count().cmp(&a.match_count())),
        SortBy::Time => recipes.sort_by_key(|r| r.recipe.cooking_time),
        SortBy::Difficulty => recipes.sort_by_key(|r| r.recipe.difficulty),
        SortBy::Servings => recipes.sort_by_key(|r| r.recipe.servings),
        SortBy::Rating => recipes.sort_by(|a, b| b.recipe.rating.total_cmp(&a.recipe.rating)),
    }
}
