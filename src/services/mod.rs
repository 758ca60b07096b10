pub mod images;
pub mod ingredients;
pub mod providers;
pub mod search;
pub mod session;
pub mod shopping_list;
pub mod suggestions;

pub use images::{generate_recipe_image, recipe_image_prompt, resolve_recipe_image, RecipeImage};
pub use ingredients::{suggest_ingredients, IngredientSelection};
pub use search::search_refine;
pub use session::AuthService;
pub use shopping_list::build_shopping_list;
pub use suggestions::match_and_rank;
