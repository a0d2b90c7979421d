use std::path::PathBuf;

use crate::{db::JsonStore, error::StoreError, models::WatchlistEntry};

/// Watchlist backed by a JSON file, unique by title
pub struct WatchlistStore {
    store: JsonStore<WatchlistEntry>,
}

impl WatchlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }

    pub fn entries(&self) -> Vec<WatchlistEntry> {
        self.store.load_all()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries().iter().any(|entry| entry.title == title)
    }

    /// Adds the entry unless its title is already present.
    ///
    /// Returns `false` for a duplicate, leaving the store untouched.
    pub fn add(&self, entry: WatchlistEntry) -> Result<bool, StoreError> {
        let added = self.store.update(|entries| {
            if entries.iter().any(|existing| existing.title == entry.title) {
                return false;
            }
            entries.push(entry);
            true
        })?;

        if !added {
            tracing::debug!(path = %self.store.path().display(), "Watchlist already has title");
        }
        Ok(added)
    }

    /// Removes every entry with this title; returns whether anything was removed
    pub fn remove(&self, title: &str) -> Result<bool, StoreError> {
        self.store.update(|entries| {
            let before = entries.len();
            entries.retain(|entry| entry.title != title);
            entries.len() != before
        })
    }
}
