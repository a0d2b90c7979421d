use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::timestamp;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const DEFAULT_REVIEWER: &str = "Anonymous";

/// A title saved to the watchlist. Titles are unique within the watchlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub title: String,
    pub movie_id: u64,
    #[serde(with = "timestamp")]
    pub added_on: DateTime<Utc>,
}

impl WatchlistEntry {
    pub fn new(title: impl Into<String>, movie_id: u64) -> Self {
        Self {
            title: title.into(),
            movie_id,
            added_on: timestamp::now(),
        }
    }
}

/// A user review of a catalog title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub movie: String,
    pub rating: u8,
    pub review: String,
    pub user: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Review {
    /// Builds a review, trimming text fields.
    ///
    /// Rejects empty review text and ratings outside `MIN_RATING..=MAX_RATING`.
    /// A blank user name falls back to `DEFAULT_REVIEWER`.
    pub fn new(movie: &str, rating: u8, review: &str, user: Option<&str>) -> AppResult<Self> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::InvalidInput(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let review = review.trim();
        if review.is_empty() {
            return Err(AppError::InvalidInput(
                "Review text cannot be empty".to_string(),
            ));
        }

        let user = user
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_REVIEWER);

        Ok(Self {
            movie: movie.to_string(),
            rating,
            review: review.to_string(),
            user: user.to_string(),
            timestamp: timestamp::now(),
        })
    }
}

/// Free-form feedback about the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackEntry {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl FeedbackEntry {
    /// Builds a feedback entry; every field is trimmed and must be non-empty
    pub fn new(name: &str, email: &str, message: &str) -> AppResult<Self> {
        let (name, email, message) = (name.trim(), email.trim(), message.trim());
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(AppError::InvalidInput(
                "Please fill all fields".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            timestamp: timestamp::now(),
        })
    }
}
