use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::str::FromStr;

use super::Difficulty;

pub const MIN_COOKING_TIME: u32 = 10;
pub const MAX_COOKING_TIME: u32 = 120;

pub const DIETARY_OPTIONS: [&str; 8] = [
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Dairy-Free",
    "Low-Carb",
    "Keto",
    "Paleo",
    "Mediterranean",
];

pub const SERVING_THRESHOLDS: [u32; 4] = [2, 4, 6, 8];

/// Ordering applied to suggestion results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortBy {
    /// Most matched ingredients first
    #[default]
    Match,
    /// Shortest cooking time first
    Time,
    /// Easiest first
    Difficulty,
    /// Fewest servings first
    Servings,
    /// Highest rated first
    Rating,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Match,
        SortBy::Time,
        SortBy::Difficulty,
        SortBy::Servings,
        SortBy::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Match => "match",
            SortBy::Time => "time",
            SortBy::Difficulty => "difficulty",
            SortBy::Servings => "servings",
            SortBy::Rating => "rating",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Match => "Best Match",
            SortBy::Time => "Cooking Time",
            SortBy::Difficulty => "Difficulty",
            SortBy::Servings => "Servings",
            SortBy::Rating => "Rating",
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort order: {}", s))
    }
}

impl Serialize for SortBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Unknown orderings, and non-string values, fall back to `match` rather
// than failing the request
impl<'de> Deserialize<'de> for SortBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(raw
            .as_str()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default())
    }
}

/// User-controlled filter and sort state
///
/// Deserialization is lenient: malformed values are dropped or clamped so a
/// misbehaving control never turns into a failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(
        default = "default_max_cooking_time",
        deserialize_with = "lenient_minutes"
    )]
    pub max_cooking_time: u32,
    #[serde(default, deserialize_with = "lenient_difficulties")]
    pub difficulty: Vec<Difficulty>,
    /// Minimum-serving thresholds, a recipe passes if it meets any of them
    #[serde(default, deserialize_with = "lenient_thresholds")]
    pub servings: Vec<u32>,
    /// Dietary tags, a recipe must carry all of them
    #[serde(default, deserialize_with = "lenient_tags")]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub sort_by: SortBy,
}

fn default_max_cooking_time() -> u32 {
    MAX_COOKING_TIME
}

// The helpers below read through `Value` so a wrongly-typed field degrades
// to its default instead of rejecting the whole body.

fn lenient_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw.as_f64() {
        Some(minutes) if minutes.is_finite() => {
            minutes.clamp(MIN_COOKING_TIME as f64, MAX_COOKING_TIME as f64) as u32
        }
        _ => {
            if !raw.is_null() {
                tracing::debug!(value = %raw, "Ignoring cooking time filter value");
            }
            MAX_COOKING_TIME
        }
    })
}

/// Array elements of `raw`, or nothing when it is not an array
fn array_items(raw: Value, field: &'static str) -> Vec<Value> {
    match raw {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            tracing::debug!(field, value = %other, "Ignoring non-array filter value");
            Vec::new()
        }
    }
}

fn lenient_difficulties<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Difficulty>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    let mut parsed: Vec<Difficulty> = Vec::new();
    for item in array_items(raw, "difficulty") {
        match item.as_str().map(str::parse::<Difficulty>) {
            Some(Ok(difficulty)) if !parsed.contains(&difficulty) => parsed.push(difficulty),
            Some(Ok(_)) => {}
            Some(Err(e)) => tracing::debug!(error = %e, "Ignoring difficulty filter value"),
            None => tracing::debug!(value = %item, "Ignoring difficulty filter value"),
        }
    }
    Ok(parsed)
}

fn lenient_thresholds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u32>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    let mut thresholds: Vec<u32> = Vec::new();
    for item in array_items(raw, "servings") {
        match item.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(threshold) if !thresholds.contains(&threshold) => thresholds.push(threshold),
            Some(_) => {}
            None => tracing::debug!(value = %item, "Ignoring servings filter value"),
        }
    }
    Ok(thresholds)
}

fn lenient_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    let mut tags: Vec<String> = Vec::new();
    for item in array_items(raw, "dietaryRestrictions") {
        match item {
            Value::String(tag) if !tags.contains(&tag) => tags.push(tag),
            Value::String(_) => {}
            other => tracing::debug!(value = %other, "Ignoring dietary filter value"),
        }
    }
    Ok(tags)
}

/// Whole-object fallback for embedding `FilterOptions` in a request body
///
/// A `filters` value that is not an object at all yields the defaults.
pub fn lenient_filters<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<FilterOptions, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(FilterOptions::deserialize(raw).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Ignoring malformed filters");
        FilterOptions::default()
    }))
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            max_cooking_time: MAX_COOKING_TIME,
            difficulty: Vec::new(),
            servings: Vec::new(),
            dietary_restrictions: Vec::new(),
            sort_by: SortBy::Match,
        }
    }
}

impl FilterOptions {
    /// Cooking time bound actually applied, clamped into the slider range
    pub fn effective_max_cooking_time(&self) -> u32 {
        self.max_cooking_time
            .clamp(MIN_COOKING_TIME, MAX_COOKING_TIME)
    }

    /// True when any field differs from the defaults
    pub fn has_active_filters(&self) -> bool {
        self.effective_max_cooking_time() < MAX_COOKING_TIME
            || !self.difficulty.is_empty()
            || !self.servings.is_empty()
            || !self.dietary_restrictions.is_empty()
            || self.sort_by != SortBy::Match
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) {
        toggle(&mut self.difficulty, difficulty);
    }

    pub fn toggle_servings(&mut self, threshold: u32) {
        toggle(&mut self.servings, threshold);
    }

    pub fn toggle_dietary_restriction(&mut self, tag: &str) {
        toggle(&mut self.dietary_restrictions, tag.to_string());
    }

    /// Resets every field to its default
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}
