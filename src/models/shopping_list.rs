use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One deduplicated ingredient on the shopping list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEntry {
    /// Display form, the first spelling seen
    pub ingredient: String,
    /// Titles of the recipes needing this ingredient, in processing order
    pub contributing_recipe_titles: Vec<String>,
    pub recipe_count: usize,
}

impl ShoppingListEntry {
    pub fn new(ingredient: String, recipe_title: String) -> Self {
        Self {
            ingredient,
            contributing_recipe_titles: vec![recipe_title],
            recipe_count: 1,
        }
    }

    /// Records another contributing recipe, ignoring repeats
    pub fn add_recipe(&mut self, recipe_title: &str) {
        if !self
            .contributing_recipe_titles
            .iter()
            .any(|t| t == recipe_title)
        {
            self.contributing_recipe_titles
                .push(recipe_title.to_string());
            self.recipe_count = self.contributing_recipe_titles.len();
        }
    }

    /// Key used for deduplication and checked state
    pub fn key(&self) -> String {
        ingredient_key(&self.ingredient)
    }
}

/// Case-insensitive identity of an ingredient on the list
pub fn ingredient_key(ingredient: &str) -> String {
    ingredient.trim().to_lowercase()
}

/// Recipes flagged for shopping, in the order they were flagged
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShoppingSelection {
    recipe_ids: Vec<String>,
}

impl ShoppingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the recipe if absent, removes it otherwise
    pub fn toggle(&mut self, recipe_id: &str) {
        if let Some(pos) = self.recipe_ids.iter().position(|id| id == recipe_id) {
            self.recipe_ids.remove(pos);
        } else {
            self.recipe_ids.push(recipe_id.to_string());
        }
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.recipe_ids.iter().any(|id| id == recipe_id)
    }

    pub fn recipe_ids(&self) -> &[String] {
        &self.recipe_ids
    }

    pub fn len(&self) -> usize {
        self.recipe_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipe_ids.is_empty()
    }
}

/// Which shopping-list items have been ticked off
///
/// Purely session state for progress display.
#[derive(Debug, Clone, Default)]
pub struct ShoppingChecklist {
    checked: HashSet<String>,
}

impl ShoppingChecklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, ingredient: &str) {
        let key = ingredient_key(ingredient);
        if !self.checked.remove(&key) {
            self.checked.insert(key);
        }
    }

    pub fn is_checked(&self, ingredient: &str) -> bool {
        self.checked.contains(&ingredient_key(ingredient))
    }

    pub fn clear(&mut self) {
        self.checked.clear();
    }

    pub fn check_all(&mut self, entries: &[ShoppingListEntry]) {
        self.checked = entries.iter().map(ShoppingListEntry::key).collect();
    }

    /// Number of entries in `entries` that are checked
    pub fn completed(&self, entries: &[ShoppingListEntry]) -> usize {
        entries
            .iter()
            .filter(|entry| self.checked.contains(&entry.key()))
            .count()
    }

    /// Percentage of entries checked, 0 for an empty list
    pub fn progress(&self, entries: &[ShoppingListEntry]) -> f64 {
        if entries.is_empty() {
            return 0.0;
        }
        self.completed(entries) as f64 / entries.len() as f64 * 100.0
    }
}
