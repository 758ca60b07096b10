use std::collections::HashMap;

use crate::models::{shopping_list::ingredient_key, Recipe, ShoppingListEntry};

/// Merges the ingredients of the recipes flagged for shopping
///
/// Entries come out in first-seen order across the recipes as given. Each
/// entry lists the titles of the recipes that need it, once per recipe.
/// Ingredients are deduplicated case-insensitively ("Garlic" and "garlic"
/// share one entry) and the first spelling seen is kept for display.
///
/// Callers pass recipes already deduplicated by id, in selection order.
pub fn build_shopping_list<'a, I>(recipes: I) -> Vec<ShoppingListEntry>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut entries: Vec<ShoppingListEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut recipe_count = 0usize;

    for recipe in recipes {
        recipe_count += 1;
        for ingredient in &recipe.ingredients {
            let key = ingredient_key(ingredient);
            match positions.get(&key) {
                Some(&pos) => entries[pos].add_recipe(&recipe.title),
                None => {
                    positions.insert(key, entries.len());
                    entries.push(ShoppingListEntry::new(
                        ingredient.clone(),
                        recipe.title.clone(),
                    ));
                }
            }
        }
    }

    tracing::debug!(
        recipes = recipe_count,
        items = entries.len(),
        "Built shopping list"
    );

    entries
}
