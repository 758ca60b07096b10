use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Error types for rating submission
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating must be between 1 and 5, got {0}")]
    OutOfRange(u8),
    #[error("This rating is read-only")]
    ReadOnly,
    #[error("Rating service unavailable: {0}")]
    Unavailable(String),
}

/// Checks a user-submitted rating value
pub fn validate_rating(value: u8) -> Result<u8, RatingError> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(value)
    } else {
        Err(RatingError::OutOfRange(value))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RatingMode {
    /// Shows the aggregate only
    ReadOnly,
    /// Accepts a local rating from the user
    Interactive,
}

/// Star-rating control state
///
/// A local rating never changes the aggregate it is displayed alongside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingControl {
    pub rating: f32,
    pub total_ratings: u32,
    pub mode: RatingMode,
    pub user_rating: Option<u8>,
}

impl RatingControl {
    pub fn read_only(rating: f32, total_ratings: u32) -> Self {
        Self {
            rating,
            total_ratings,
            mode: RatingMode::ReadOnly,
            user_rating: None,
        }
    }

    pub fn interactive(rating: f32, total_ratings: u32) -> Self {
        Self {
            mode: RatingMode::Interactive,
            ..Self::read_only(rating, total_ratings)
        }
    }

    /// Sets the local rating
    pub fn rate(&mut self, value: u8) -> Result<(), RatingError> {
        if self.mode == RatingMode::ReadOnly {
            return Err(RatingError::ReadOnly);
        }
        self.user_rating = Some(validate_rating(value)?);
        Ok(())
    }

    /// Unsets the local rating
    pub fn clear(&mut self) {
        self.user_rating = None;
    }

    /// Local rating when set, otherwise the aggregate
    pub fn display_rating(&self) -> f32 {
        self.user_rating
            .map(f32::from)
            .unwrap_or(self.rating)
    }

    /// Whether the clear action should be offered
    pub fn can_clear(&self) -> bool {
        self.mode == RatingMode::Interactive && self.user_rating.is_some()
    }

    /// e.g. "4.5 (12 ratings)"
    pub fn summary(&self) -> String {
        let noun = if self.total_ratings == 1 {
            "rating"
        } else {
            "ratings"
        };
        format!("{:.1} ({} {})", self.display_rating(), self.total_ratings, noun)
    }
}
