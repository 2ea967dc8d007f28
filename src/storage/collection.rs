//! Generic JSON-backed entity collection
//!
//! Every collection keeps its records in memory, indexed by id, and writes
//! the whole collection to a single JSON array file on `save`.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::ExpenseError;
use crate::models::EntityId;

use super::file_io::{read_json, write_json_atomic};

/// An entity that can be stored in a [`Collection`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: EntityId;

    /// Human-readable entity name used in error messages
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;

    /// Listing order for `get_all` and for the file on disk
    fn compare(&self, other: &Self) -> Ordering;
}

/// In-memory index of one entity type, persisted to one file
pub struct Collection<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> Collection<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<T::Id, T>>, ExpenseError> {
        self.data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<T::Id, T>>, ExpenseError> {
        self.data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load records from disk, replacing whatever is in memory
    pub fn load(&self) -> Result<(), ExpenseError> {
        let records: Vec<T> = read_json(&self.path)?;
        debug!(
            entity = T::ENTITY,
            count = records.len(),
            path = %self.path.display(),
            "loaded collection"
        );

        let mut data = self.write()?;
        data.clear();
        for record in records {
            data.insert(record.id(), record);
        }

        Ok(())
    }

    /// Write every record to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let records = self.get_all()?;
        write_json_atomic(&self.path, &records)
    }

    pub fn get(&self, id: T::Id) -> Result<Option<T>, ExpenseError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All records in listing order
    pub fn get_all(&self) -> Result<Vec<T>, ExpenseError> {
        let mut records: Vec<T> = self.read()?.values().cloned().collect();
        records.sort_by(T::compare);
        Ok(records)
    }

    /// Records matching a predicate, in listing order
    pub fn filter<F>(&self, predicate: F) -> Result<Vec<T>, ExpenseError>
    where
        F: Fn(&T) -> bool,
    {
        let mut records: Vec<T> = self
            .read()?
            .values()
            .filter(|r| predicate(*r))
            .cloned()
            .collect();
        records.sort_by(T::compare);
        Ok(records)
    }

    /// Whether any record matches a predicate
    pub fn any<F>(&self, predicate: F) -> Result<bool, ExpenseError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.read()?.values().any(predicate))
    }

    /// Replace the whole collection and persist it
    pub fn replace_all(&self, records: Vec<T>) -> Result<(), ExpenseError> {
        {
            let mut data = self.write()?;
            data.clear();
            for record in records {
                data.insert(record.id(), record);
            }
        }
        self.save()
    }

    /// Insert or update a record (in memory; call `save` to persist)
    pub fn upsert(&self, record: T) -> Result<(), ExpenseError> {
        self.write()?.insert(record.id(), record);
        Ok(())
    }

    /// Remove a record, returning it if it existed
    pub fn delete(&self, id: T::Id) -> Result<Option<T>, ExpenseError> {
        Ok(self.write()?.remove(&id))
    }

    /// Remove every record matching a predicate, returning how many went
    pub fn delete_where<F>(&self, predicate: F) -> Result<usize, ExpenseError>
    where
        F: Fn(&T) -> bool,
    {
        let mut data = self.write()?;
        let before = data.len();
        data.retain(|_, r| !predicate(&*r));
        Ok(before - data.len())
    }

    pub fn exists(&self, id: T::Id) -> Result<bool, ExpenseError> {
        Ok(self.read()?.contains_key(&id))
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        Ok(self.read()?.len())
    }

    /// Resolve a user-typed id (full UUID, short display form or prefix).
    ///
    /// An input matching more than one record is a validation error.
    pub fn find_by_short_id(&self, input: &str) -> Result<Option<T>, ExpenseError> {
        let data = self.read()?;
        let mut matches = data.values().filter(|r| r.id().matches_short(input));

        let first = match matches.next() {
            Some(first) => first,
            None => return Ok(None),
        };

        if matches.next().is_some() {
            return Err(ExpenseError::Validation(format!(
                "'{}' matches more than one {}; use a longer id",
                input,
                T::ENTITY.to_lowercase()
            )));
        }

        Ok(Some(first.clone()))
    }
}
