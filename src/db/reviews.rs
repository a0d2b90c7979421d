use std::path::PathBuf;

use crate::{db::JsonStore, error::StoreError, models::Review};

/// Append-only review log
pub struct ReviewStore {
    store: JsonStore<Review>,
}

impl ReviewStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    pub fn all(&self) -> Vec<Review> {
        self.store.load_all()
    }

    pub fn add(&self, review: Review) -> Result<(), StoreError> {
        self.store.append(review)
    }

    /// Reviews for an exact movie title, in the order they were written
    pub fn for_movie(&self, movie: &str) -> Vec<Review> {
        self.all()
            .into_iter()
            .filter(|review| review.movie == movie)
            .collect()
    }
}
