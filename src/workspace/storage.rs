//! Persistence contract for workspace collections.
//!
//! The collection is stored as one opaque JSON blob. Storage medium is up
//! to the implementation; two are provided:
//!
//! | Storage | Medium |
//! |---------|--------|
//! | [`MemoryStorage`] | in-process string slots |
//! | [`JsonFileStorage`] | a JSON file on disk |
//!
//! A store may also hold a *legacy* document: a single schedule text from
//! before workspaces existed. It is read once for migration, then cleared.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Workspace;
use crate::error::StorageError;

/// Serialized form of a workspace collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCollection {
    /// All workspaces, in display order.
    pub workspaces: Vec<Workspace>,
    /// Workspace shown on load.
    pub current_id: Uuid,
}

/// Load/save of a workspace collection.
pub trait WorkspaceStorage {
    /// Reads the stored collection. `Ok(None)` when nothing was saved yet.
    fn load(&self) -> Result<Option<StoredCollection>, StorageError>;

    /// Replaces the stored collection.
    fn save(&mut self, collection: &StoredCollection) -> Result<(), StorageError>;

    /// Reads a pre-workspace single document, if any.
    fn load_legacy(&self) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    /// Removes the pre-workspace document after migration.
    fn clear_legacy(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// In-memory storage holding the JSON blob as a string.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blob: Option<String>,
    legacy: Option<String>,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills the stored blob (may be malformed).
    pub fn with_blob(mut self, blob: impl Into<String>) -> Self {
        self.blob = Some(blob.into());
        self
    }

    /// Pre-fills a legacy document.
    pub fn with_legacy(mut self, text: impl Into<String>) -> Self {
        self.legacy = Some(text.into());
        self
    }

    /// The raw stored blob.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// The legacy document, if not yet cleared.
    pub fn legacy(&self) -> Option<&str> {
        self.legacy.as_deref()
    }
}

impl WorkspaceStorage for MemoryStorage {
    fn load(&self) -> Result<Option<StoredCollection>, StorageError> {
        self.blob
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(StorageError::from)
    }

    fn save(&mut self, collection: &StoredCollection) -> Result<(), StorageError> {
        self.blob = Some(serde_json::to_string(collection)?);
        Ok(())
    }

    fn load_legacy(&self) -> Result<Option<String>, StorageError> {
        Ok(self.legacy.clone())
    }

    fn clear_legacy(&mut self) -> Result<(), StorageError> {
        self.legacy = None;
        Ok(())
    }
}

/// Storage backed by a JSON file, with an optional plain-text legacy file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    legacy_path: Option<PathBuf>,
}

impl JsonFileStorage {
    /// Stores the collection at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            legacy_path: None,
        }
    }

    /// Reads a legacy document from `path` on first load.
    pub fn with_legacy_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.legacy_path = Some(path.into());
        self
    }

    /// Collection file location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkspaceStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<StoredCollection>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save(&mut self, collection: &StoredCollection) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(collection)?)?;
        Ok(())
    }

    fn load_legacy(&self) -> Result<Option<String>, StorageError> {
        match &self.legacy_path {
            Some(path) if path.exists() => Ok(Some(fs::read_to_string(path)?)),
            _ => Ok(None),
        }
    }

    fn clear_legacy(&mut self) -> Result<(), StorageError> {
        match &self.legacy_path {
            Some(path) if path.exists() => Ok(fs::remove_file(path)?),
            _ => Ok(()),
        }
    }
}
