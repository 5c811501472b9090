//! Moving the document between memory, key/value storage and JSON files.
//!
//! The persisted shape is a bare JSON array of subjects. Parsing performs no
//! schema validation beyond JSON syntax: missing fields fall back to empty
//! values and are accepted as-is.

use std::collections::HashMap;

use thiserror::Error;

use crate::model::Subject;

/// Key under which the document is kept in storage
pub const STORAGE_KEY: &str = "faqData";

/// Fixed name for downloaded documents
pub const DOWNLOAD_FILENAME: &str = "faq-data.json";

/// Errors raised while saving or loading a document.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to parse document: {0}")]
    Parse(#[source] serde_json::Error),

    /// The storage backend refused the read or write.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// A string key/value store, in the manner of browser `localStorage`
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-process storage, used by tests and as a fallback backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn to_json(subjects: &[Subject]) -> Result<String, PersistError> {
    serde_json::to_string(subjects).map_err(PersistError::Serialize)
}

/// Pretty-printed form used for file downloads
pub fn to_json_pretty(subjects: &[Subject]) -> Result<String, PersistError> {
    serde_json::to_string_pretty(subjects).map_err(PersistError::Serialize)
}

pub fn from_json(json: &str) -> Result<Vec<Subject>, PersistError> {
    serde_json::from_str(json).map_err(PersistError::Parse)
}

/// Serialize and store the document under [`STORAGE_KEY`].
///
/// Serialization happens before the write, so a failure leaves the previously
/// stored value in place.
pub fn save(storage: &mut dyn Storage, subjects: &[Subject]) -> Result<(), PersistError> {
    let json = to_json(subjects)?;
    storage.set_item(STORAGE_KEY, &json)
}

/// Read the stored document, `Ok(None)` when nothing has been saved yet
pub fn load(storage: &dyn Storage) -> Result<Option<Vec<Subject>>, PersistError> {
    match storage.get_item(STORAGE_KEY)? {
        Some(json) => from_json(&json).map(Some),
        None => Ok(None),
    }
}
