use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// How demanding a recipe is to cook
///
/// Variant order is the sort ordinal: Easy < Medium < Hard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

/// A recipe from the catalog
///
/// Recipes are loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    /// Display name, unique within the catalog
    pub title: String,
    pub description: String,
    /// Ingredient names in the order the recipe lists them
    pub ingredients: Vec<String>,
    /// Cooking time in minutes
    pub cooking_time: u32,
    pub difficulty: Difficulty,
    pub servings: u32,
    /// Steps in cooking order
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Aggregate rating in [0, 5]
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub total_ratings: u32,
    /// Dietary tags such as "Vegetarian"
    #[serde(default)]
    pub dietary_info: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Recipe {
    pub fn has_dietary_tag(&self, tag: &str) -> bool {
        self.dietary_info.iter().any(|t| t == tag)
    }
}

/// A recipe annotated with the ingredients the user already has
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Subsequence of `recipe.ingredients` covered by the selection
    pub matched_ingredients: Vec<String>,
}

impl MatchedRecipe {
    pub fn new(recipe: Recipe, matched_ingredients: Vec<String>) -> Self {
        Self {
            recipe,
            matched_ingredients,
        }
    }

    pub fn match_count(&self) -> usize {
        self.matched_ingredients.len()
    }

    /// Match count over total ingredient count, 0 for a recipe with no ingredients
    pub fn match_ratio(&self) -> f64 {
        if self.recipe.ingredients.is_empty() {
            return 0.0;
        }
        self.match_count() as f64 / self.recipe.ingredients.len() as f64
    }

    /// Whole-number "% match" used for display
    pub fn match_percentage(&self) -> u32 {
        (self.match_ratio() * 100.0).round() as u32
    }
}
