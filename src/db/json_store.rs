use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{
    fs,
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use crate::error::StoreError;

/// A JSON array of records in a single file.
///
/// Every mutation reads the whole file, changes it in memory and rewrites it in
/// full. A missing file is initialised to `[]` on first read. A file that isn't a
/// JSON array reads as empty and is overwritten by the next mutation; individual
/// records that don't deserialize are skipped and dropped on the next rewrite.
///
/// Reads and writes from this process are serialized; other processes writing the same
/// file are not coordinated with.
pub struct JsonStore<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record, creating an empty store if none exists yet
    pub fn load_all(&self) -> Vec<T> {
        let _guard = self.lock();
        self.read_records()
    }

    /// Replaces the store's contents
    pub fn save_all(&self, records: &[T]) -> Result<(), StoreError> {
        let _guard = self.lock();
        self.write_records(records)
    }

    pub fn append(&self, record: T) -> Result<(), StoreError> {
        self.update(|records| {
            records.push(record);
            true
        })
        .map(|_| ())
    }

    /// Load, mutate, rewrite.
    ///
    /// `mutate` returns whether anything changed; the file is only rewritten if so.
    pub fn update<F>(&self, mutate: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut Vec<T>) -> bool,
    {
        let _guard = self.lock();
        let mut records = self.read_records();
        let changed = mutate(&mut records);
        if changed {
            self.write_records(&records)?;
        }
        Ok(changed)
    }

    /// Caller must hold the lock, since a missing file is initialised here.
    ///
    /// Records that don't fit `T` are skipped; only unparseable JSON empties the store.
    fn read_records(&self) -> Vec<T> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Err(e) = self.write_raw(b"[]") {
                    tracing::warn!(path = %self.path.display(), error = %e, "Failed to initialise store");
                }
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read store, treating as empty");
                return Vec::new();
            }
        };

        let values: Vec<Value> = match serde_json::from_str(&contents) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Malformed store, treating as empty");
                return Vec::new();
            }
        };

        values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), index, error = %e, "Skipping unreadable record");
                    None
                }
            })
            .collect()
    }

    fn write_records(&self, records: &[T]) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(records)?;
        self.write_raw(&payload)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data, so a poisoned lock is still usable
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write via temp file + rename so readers never see a half-written file
    fn write_raw(&self, payload: &[u8]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, payload).map_err(io_err)?;
        fs::rename(&tmp_path, &self.path).map_err(io_err)?;
        Ok(())
    }
}
