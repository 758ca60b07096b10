use serde::{Deserialize, Serialize};

use crate::catalog::POPULAR_INGREDIENTS;

/// Popular ingredients containing `term` that are not selected yet
pub fn suggest_ingredients(term: &str, selected: &[String]) -> Vec<&'static str> {
    let term = term.trim().to_lowercase();
    POPULAR_INGREDIENTS
        .into_iter()
        .filter(|ingredient| ingredient.contains(term.as_str()))
        .filter(|ingredient| !selected.iter().any(|s| s == ingredient))
        .collect()
}

/// The user's on-hand ingredients, ordered and without repeats
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngredientSelection {
    ingredients: Vec<String>,
}

impl IngredientSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trimmed ingredient, returns false for blank or repeated input
    pub fn add(&mut self, ingredient: &str) -> bool {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() || self.contains(ingredient) {
            return false;
        }
        self.ingredients.push(ingredient.to_string());
        true
    }

    pub fn remove(&mut self, ingredient: &str) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i != ingredient.trim());
        self.ingredients.len() != before
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.ingredients.iter().any(|i| i == ingredient)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ingredients
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

impl From<Vec<String>> for IngredientSelection {
    fn from(ingredients: Vec<String>) -> Self {
        let mut selection = Self::new();
        for ingredient in &ingredients {
            selection.add(ingredient);
        }
        selection
    }
}
