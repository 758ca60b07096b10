use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::config::Config;
use crate::models::{Difficulty, Recipe};

/// Ingredients offered as one-click picks
pub const POPULAR_INGREDIENTS: [&str; 22] = [
    "chicken",
    "beef",
    "fish",
    "eggs",
    "tomatoes",
    "onions",
    "garlic",
    "cheese",
    "rice",
    "pasta",
    "potatoes",
    "carrots",
    "peppers",
    "mushrooms",
    "spinach",
    "broccoli",
    "herbs",
    "lemon",
    "olive oil",
    "milk",
    "flour",
    "beans",
];

/// Error types for catalog loading
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate recipe id: {0}")]
    DuplicateId(String),
    #[error("Duplicate recipe title: {0}")]
    DuplicateTitle(String),
    #[error("Invalid recipe {id}: {reason}")]
    InvalidRecipe { id: String, reason: String },
}

/// Read-only recipe collection, loaded once at startup
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Builds a catalog after checking its invariants
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut titles = HashSet::new();

        for recipe in &recipes {
            if !ids.insert(recipe.id.as_str()) {
                return Err(CatalogError::DuplicateId(recipe.id.clone()));
            }
            if !titles.insert(recipe.title.as_str()) {
                return Err(CatalogError::DuplicateTitle(recipe.title.clone()));
            }
            validate_recipe(recipe)?;
        }

        Ok(Self { recipes })
    }

    /// The bundled sample recipes, held to the same checks as a loaded file
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(sample_recipes())
    }

    /// Loads a JSON array of recipes from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let recipes: Vec<Recipe> = serde_json::from_str(&contents)?;
        Self::new(recipes)
    }

    /// Uses `CATALOG_PATH` when configured, the bundled recipes otherwise
    pub fn load(config: &Config) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::builtin()?,
        };

        tracing::info!(
            recipe_count = catalog.len(),
            source = config.catalog_path.as_deref().unwrap_or("builtin"),
            "Recipe catalog loaded"
        );

        Ok(catalog)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Resolves ids in the given order, skipping unknown and repeated ids
    pub fn select(&self, ids: &[String]) -> Vec<&Recipe> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| self.get(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

fn validate_recipe(recipe: &Recipe) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidRecipe {
        id: recipe.id.clone(),
        reason: reason.to_string(),
    };

    if recipe.cooking_time == 0 {
        return Err(invalid("cooking time must be positive"));
    }
    if recipe.servings == 0 {
        return Err(invalid("servings must be positive"));
    }
    if !(0.0..=5.0).contains(&recipe.rating) {
        return Err(invalid("rating must be within 0 and 5"));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn recipe(
    id: &str,
    title: &str,
    description: &str,
    ingredients: &[&str],
    cooking_time: u32,
    difficulty: Difficulty,
    servings: u32,
    instructions: &[&str],
    rating: f32,
    total_ratings: u32,
    dietary_info: &[&str],
) -> Recipe {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        ingredients: owned(ingredients),
        cooking_time,
        difficulty,
        servings,
        instructions: owned(instructions),
        rating,
        total_ratings,
        dietary_info: owned(dietary_info),
        image: None,
    }
}

fn sample_recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "1",
            "Classic Chicken Stir-Fry",
            "Quick and healthy stir-fry with fresh vegetables and tender chicken in a savory sauce.",
            &["chicken", "bell peppers", "onions", "garlic", "soy sauce", "oil", "ginger"],
            15,
            Difficulty::Easy,
            4,
            &[
                "Slice the chicken into thin strips and the peppers and onions into wedges.",
                "Heat the oil in a wok over high heat and sear the chicken until golden.",
                "Add garlic, ginger and the vegetables and stir-fry for three minutes.",
                "Pour in the soy sauce, toss to coat and serve immediately.",
            ],
            4.6,
            128,
            &["Dairy-Free"],
        ),
        recipe(
            "2",
            "Creamy Tomato Pasta",
            "Rich and creamy pasta dish with fresh tomatoes, herbs, and parmesan cheese.",
            &["pasta", "tomatoes", "cream", "cheese", "garlic", "herbs", "olive oil"],
            25,
            Difficulty::Easy,
            4,
            &[
                "Cook the pasta in salted water until al dente.",
                "Soften the garlic in olive oil, then add chopped tomatoes and simmer.",
                "Stir in the cream and most of the cheese.",
                "Toss the pasta through the sauce and finish with herbs and the remaining cheese.",
            ],
            4.4,
            96,
            &["Vegetarian"],
        ),
        recipe(
            "3",
            "Beef and Mushroom Stroganoff",
            "Tender beef strips in a rich mushroom cream sauce served over rice or noodles.",
            &["beef", "mushrooms", "onions", "cream", "flour", "butter", "herbs"],
            35,
            Difficulty::Medium,
            6,
            &[
                "Dust the beef strips in flour and brown them in butter, then set aside.",
                "Cook the onions and mushrooms in the same pan until soft.",
                "Return the beef, pour in the cream and simmer until thickened.",
                "Season, scatter with herbs and serve over rice or noodles.",
            ],
            4.7,
            74,
            &[],
        ),
        recipe(
            "4",
            "Mediterranean Fish Bake",
            "Fresh fish fillets baked with tomatoes, olives, and Mediterranean herbs.",
            &["fish", "tomatoes", "olives", "onions", "herbs", "olive oil", "lemon"],
            30,
            Difficulty::Medium,
            4,
            &[
                "Heat the oven to 200C.",
                "Layer sliced onions, tomatoes and olives in a baking dish with olive oil.",
                "Lay the fish on top, season with herbs and lemon slices.",
                "Bake for 20 minutes until the fish flakes easily.",
            ],
            4.5,
            52,
            &["Gluten-Free", "Dairy-Free", "Mediterranean"],
        ),
        recipe(
            "5",
            "Vegetarian Fried Rice",
            "Colorful fried rice packed with vegetables and scrambled eggs.",
            &["rice", "eggs", "carrots", "peas", "onions", "soy sauce", "oil"],
            20,
            Difficulty::Easy,
            4,
            &[
                "Scramble the eggs in a little oil and set aside.",
                "Fry the onions, carrots and peas until tender.",
                "Add the cold rice and fry until heated through.",
                "Fold in the eggs and season with soy sauce.",
            ],
            4.2,
            143,
            &["Vegetarian", "Dairy-Free"],
        ),
        recipe(
            "6",
            "Cheese and Herb Omelette",
            "Fluffy omelette filled with melted cheese and fresh herbs.",
            &["eggs", "cheese", "herbs", "butter", "milk"],
            10,
            Difficulty::Easy,
            2,
            &[
                "Whisk the eggs with the milk and a pinch of salt.",
                "Melt the butter in a pan and pour in the eggs.",
                "When almost set, add the cheese and herbs and fold over.",
            ],
            4.3,
            61,
            &["Vegetarian", "Gluten-Free", "Low-Carb", "Keto"],
        ),
        recipe(
            "7",
            "Spicy Potato Curry",
            "Hearty curry with tender potatoes in a rich, spiced tomato sauce.",
            &["potatoes", "tomatoes", "onions", "garlic", "spices", "oil", "herbs"],
            40,
            Difficulty::Medium,
            6,
            &[
                "Fry the onions and garlic in oil until golden.",
                "Add the spices and cook for one minute.",
                "Add the tomatoes and diced potatoes with a splash of water.",
                "Simmer covered for 30 minutes until the potatoes are tender.",
                "Finish with fresh herbs.",
            ],
            4.8,
            87,
            &["Vegetarian", "Vegan", "Gluten-Free", "Dairy-Free"],
        ),
        recipe(
            "8",
            "Grilled Chicken Salad",
            "Fresh mixed greens topped with grilled chicken and seasonal vegetables.",
            &["chicken", "lettuce", "tomatoes", "cucumber", "onions", "olive oil"],
            20,
            Difficulty::Easy,
            2,
            &[
                "Brush the chicken with olive oil and grill until cooked through.",
                "Chop the lettuce, tomatoes, cucumber and onions.",
                "Slice the chicken and arrange it over the salad.",
                "Dress with olive oil just before serving.",
            ],
            4.1,
            39,
            &["Gluten-Free", "Dairy-Free", "Low-Carb", "Paleo"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = Catalog::builtin().unwrap();
        assert_eq!(builtin.len(), 8);

        for recipe in builtin.recipes() {
            validate_recipe(recipe).unwrap();
        }
    }

    #[test]
    fn test_load_defaults_to_builtin() {
        let catalog = Catalog::load(&Config::default()).unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.get("1").unwrap().title, "Classic Chicken Stir-Fry");
    }

    #[test]
    fn test_builtin_instructions_present() {
        for recipe in Catalog::builtin().unwrap().recipes() {
            assert!(!recipe.instructions.is_empty(), "{} has no steps", recipe.title);
        }
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.get("6").unwrap().title, "Cheese and Herb Omelette");
        assert!(catalog.get("99").is_none());
    }

    #[test]
    fn test_select_keeps_order_and_drops_duplicates() {
        let catalog = Catalog::builtin().unwrap();
        let ids = vec![
            "7".to_string(),
            "2".to_string(),
            "7".to_string(),
            "missing".to_string(),
        ];

        let titles: Vec<&str> = catalog
            .select(&ids)
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Spicy Potato Curry", "Creamy Tomato Pasta"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut recipes = Catalog::builtin().unwrap().recipes().to_vec();
        recipes[1].id = "1".to_string();
        assert!(matches!(
            Catalog::new(recipes),
            Err(CatalogError::DuplicateId(id)) if id == "1"
        ));
    }

    #[test]
    fn test_duplicate_title_rejected() {
        let mut recipes = Catalog::builtin().unwrap().recipes().to_vec();
        recipes[2].title = recipes[0].title.clone();
        assert!(matches!(
            Catalog::new(recipes),
            Err(CatalogError::DuplicateTitle(_))
        ));
    }

    #[test]
    fn test_invalid_rating_rejected() {
        let mut recipes = Catalog::builtin().unwrap().recipes().to_vec();
        recipes[0].rating = 7.5;
        assert!(matches!(
            Catalog::new(recipes),
            Err(CatalogError::InvalidRecipe { .. })
        ));
    }

    #[test]
    fn test_load_from_json_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        let json = serde_json::to_string(&Catalog::builtin().unwrap().recipes()[..2]).unwrap();
        std::fs::write(&path, json).unwrap();

        let config = Config {
            catalog_path: Some(path.to_string_lossy().into_owned()),
            ..Config::default()
        };
        let catalog = Catalog::load(&config).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.recipes()[1].title, "Creamy Tomato Pasta");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_missing_file_fails() {
        let config = Config {
            catalog_path: Some("/nonexistent/catalog.json".to_string()),
            ..Config::default()
        };
        assert!(matches!(Catalog::load(&config), Err(CatalogError::Io(_))));
    }
}
