pub mod filters;
pub mod rating;
pub mod recipe;
pub mod session;
pub mod shopping_list;

pub use filters::{FilterOptions, SortBy};
pub use rating::{RatingControl, RatingError, RatingMode};
pub use recipe::{Difficulty, MatchedRecipe, Recipe};
pub use session::{AccessLevel, Session, SessionState, UserInfo};
pub use shopping_list::{ShoppingChecklist, ShoppingListEntry, ShoppingSelection};
