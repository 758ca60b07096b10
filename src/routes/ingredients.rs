use axum::{extract::Query, Json};
use serde::Deserialize;

use crate::services::suggest_ingredients;

#[derive(Debug, Default, Deserialize)]
pub struct PopularQuery {
    #[serde(default)]
    q: String,
    /// Comma-separated ingredients already chosen
    #[serde(default)]
    selected: Option<String>,
}

impl PopularQuery {
    fn selected(&self) -> Vec<String> {
        self.selected
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Popular ingredients matching `q` that are not selected yet
pub async fn popular(Query(params): Query<PopularQuery>) -> Json<Vec<&'static str>> {
    Json(suggest_ingredients(&params.q, &params.selected()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_is_split_and_trimmed() {
        let params = PopularQuery {
            q: String::new(),
            selected: Some("chicken, rice,,".to_string()),
        };
        assert_eq!(params.selected(), vec!["chicken", "rice"]);
    }

    #[test]
    fn test_selected_absent() {
        assert!(PopularQuery::default().selected().is_empty());
    }
}
