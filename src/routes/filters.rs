use axum::Json;
use serde::Serialize;

use crate::models::{
    filters::{DIETARY_OPTIONS, MAX_COOKING_TIME, MIN_COOKING_TIME, SERVING_THRESHOLDS},
    Difficulty, FilterOptions, SortBy,
};

#[derive(Debug, Serialize)]
pub struct SortOption {
    pub value: SortBy,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CookingTimeRange {
    pub min: u32,
    pub max: u32,
}

/// Vocabulary the filter panel is built from
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsResponse {
    pub dietary_options: &'static [&'static str],
    pub difficulties: &'static [Difficulty],
    pub serving_thresholds: &'static [u32],
    pub sort_options: Vec<SortOption>,
    pub cooking_time: CookingTimeRange,
    pub defaults: FilterOptions,
}

pub async fn options() -> Json<FilterOptionsResponse> {
    Json(FilterOptionsResponse {
        dietary_options: &DIETARY_OPTIONS,
        difficulties: &Difficulty::ALL,
        serving_thresholds: &SERVING_THRESHOLDS,
        sort_options: SortBy::ALL
            .iter()
            .map(|&value| SortOption {
                value,
                label: value.label(),
            })
            .collect(),
        cooking_time: CookingTimeRange {
            min: MIN_COOKING_TIME,
            max: MAX_COOKING_TIME,
        },
        defaults: FilterOptions::default(),
    })
}
