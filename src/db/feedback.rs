use std::path::PathBuf;

use crate::{db::JsonStore, error::StoreError, models::FeedbackEntry};

/// Append-only feedback log
pub struct FeedbackStore {
    store: JsonStore<FeedbackEntry>,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    pub fn all(&self) -> Vec<FeedbackEntry> {
        self.store.load_all()
    }

    pub fn add(&self, entry: FeedbackEntry) -> Result<(), StoreError> {
        self.store.append(entry)
    }
}
