//! Named schedule documents and the current-workspace pointer.
//!
//! A [`Workspace`] is one document: a [`Frontmatter`] header plus a schedule
//! body. [`Workspaces`] owns the collection, tracks which one is current,
//! and enforces:
//! - The collection is never empty once constructed.
//! - The current id always names a workspace in the collection.
//!
//! Names are display labels. Identity is the UUID, and names are kept
//! unique only where this module creates them (new workspaces, renamed
//! imports).
//!
//! # Persistence
//! Mutations only touch memory. Call [`Workspaces::save`] with a
//! [`WorkspaceStorage`] to persist.

mod config;
mod storage;

pub use config::{WorkspaceConfig, SAMPLE_CONTENT};
pub use storage::{JsonFileStorage, MemoryStorage, StoredCollection, WorkspaceStorage};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StorageError;
use crate::frontmatter::{self, generate_unique_name, Frontmatter};
use crate::grammar::serialize_to_text;
use crate::models::Project;
use crate::scheduler::DerivedSchedule;

/// One stored schedule document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Stable identity.
    pub id: Uuid,
    /// Header metadata (`name` is the display name).
    pub frontmatter: Frontmatter,
    /// Schedule body, without header.
    pub content: String,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// How to resolve a name collision on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictResolution {
    /// Replace the existing workspace's header and body, keeping its id.
    Overwrite,
    /// Import as a new workspace under a unique name.
    Rename,
    /// Do nothing.
    Cancel,
}

/// Result of [`Workspaces::import_shared`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The document was stored and is now current.
    Imported {
        /// Id of the created or overwritten workspace.
        id: Uuid,
    },
    /// A workspace with this name exists; call again with a resolution.
    Conflict {
        /// The colliding name.
        name: String,
    },
    /// The caller chose [`ConflictResolution::Cancel`]; nothing changed.
    Cancelled,
}

impl Workspace {
    /// Creates a workspace with a fresh id.
    pub fn new(frontmatter: Frontmatter, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            frontmatter,
            content: content.into(),
            updated_at: Utc::now(),
        }
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.frontmatter.name
    }

    /// Full document text: header followed by body.
    pub fn raw_text(&self) -> String {
        frontmatter::serialize(&self.frontmatter, &self.content)
    }

    /// Parses and derives the body.
    pub fn derive(&self) -> DerivedSchedule {
        DerivedSchedule::from_content(&self.content)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// The workspace collection with a current pointer.
#[derive(Debug, Clone)]
pub struct Workspaces {
    workspaces: Vec<Workspace>,
    current_id: Uuid,
    config: WorkspaceConfig,
}

impl Workspaces {
    /// Creates a collection holding only the sample workspace.
    pub fn new(config: WorkspaceConfig) -> Self {
        let sample = Workspace::new(
            Frontmatter::new(config.sample_name.clone()).with_created_at(today()),
            config.sample_content.clone(),
        );
        Self::single(sample, config)
    }

    /// Restores a stored collection.
    ///
    /// Returns `None` for an empty collection. A `current_id` that names no
    /// workspace is repaired to the first one.
    pub fn from_stored(stored: StoredCollection, config: WorkspaceConfig) -> Option<Self> {
        let first = stored.workspaces.first()?.id;
        let current_id = if stored.workspaces.iter().any(|w| w.id == stored.current_id) {
            stored.current_id
        } else {
            warn!(stored = %stored.current_id, "current workspace missing, using first");
            first
        };
        Some(Self {
            workspaces: stored.workspaces,
            current_id,
            config,
        })
    }

    /// Loads from storage, falling back to legacy migration and then to the
    /// sample workspace.
    ///
    /// Storage errors are logged and treated as "nothing stored". When the
    /// collection had to be created, it is saved back immediately.
    pub fn load<S: WorkspaceStorage>(storage: &mut S, config: WorkspaceConfig) -> Self {
        match storage.load() {
            Ok(Some(stored)) => {
                if let Some(workspaces) = Self::from_stored(stored, config.clone()) {
                    debug!(count = workspaces.len(), "loaded workspaces");
                    return workspaces;
                }
                warn!("stored workspace collection is empty");
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "failed to load workspaces"),
        }

        let legacy = storage.load_legacy().unwrap_or_else(|err| {
            warn!(error = %err, "failed to read legacy document");
            None
        });

        let workspaces = match legacy {
            Some(text) => {
                let migrated = Self::migrate_legacy(&text, config);
                info!(name = migrated.current().name(), "migrated legacy document");
                migrated
            }
            None => {
                info!("creating sample workspace");
                Self::new(config)
            }
        };

        match workspaces.save(storage) {
            Ok(()) => {
                if let Err(err) = storage.clear_legacy() {
                    warn!(error = %err, "failed to clear legacy document");
                }
            }
            Err(err) => warn!(error = %err, "failed to save workspaces"),
        }

        workspaces
    }

    /// Builds a one-workspace collection from a pre-workspace document.
    pub fn migrate_legacy(text: &str, config: WorkspaceConfig) -> Self {
        let parsed = frontmatter::parse(text);
        let fm = parsed
            .frontmatter
            .unwrap_or_else(|| Frontmatter::new(config.legacy_name.clone()));
        Self::single(Workspace::new(fm, parsed.content), config)
    }

    /// Writes the collection to storage.
    pub fn save<S: WorkspaceStorage>(&self, storage: &mut S) -> Result<(), StorageError> {
        storage.save(&self.to_stored())
    }

    /// Snapshot for storage.
    pub fn to_stored(&self) -> StoredCollection {
        StoredCollection {
            workspaces: self.workspaces.clone(),
            current_id: self.current_id,
        }
    }

    fn single(workspace: Workspace, config: WorkspaceConfig) -> Self {
        Self {
            current_id: workspace.id,
            workspaces: vec![workspace],
            config,
        }
    }

    // ---- Queries -------------------------------------------------------

    /// The current workspace.
    pub fn current(&self) -> &Workspace {
        &self.workspaces[self.current_index()]
    }

    /// Id of the current workspace.
    #[inline]
    pub fn current_id(&self) -> Uuid {
        self.current_id
    }

    /// Current workspace as full document text.
    pub fn current_raw_text(&self) -> String {
        self.current().raw_text()
    }

    /// Derived schedule of the current workspace.
    pub fn current_schedule(&self) -> DerivedSchedule {
        self.current().derive()
    }

    /// Looks up a workspace by id.
    pub fn get(&self, id: Uuid) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.id == id)
    }

    /// All display names, in collection order.
    pub fn names(&self) -> Vec<String> {
        self.workspaces.iter().map(|w| w.name().to_string()).collect()
    }

    /// Iterates workspaces in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &Workspace> {
        self.workspaces.iter()
    }

    /// Number of workspaces (at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    /// Always `false`; kept for API symmetry with [`len`](Self::len).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    /// Active configuration.
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    // ---- Mutations -----------------------------------------------------

    /// Adds an empty workspace and makes it current.
    ///
    /// `name` defaults to the configured base name and is made unique.
    pub fn create(&mut self, name: Option<&str>) -> Uuid {
        let base = name.unwrap_or(self.config.default_name.as_str());
        let unique = generate_unique_name(base, &self.names());
        let ws = Workspace::new(Frontmatter::new(unique).with_created_at(today()), "");
        let id = ws.id;
        debug!(%id, name = ws.name(), "created workspace");
        self.workspaces.push(ws);
        self.current_id = id;
        id
    }

    /// Removes a workspace.
    ///
    /// Returns `false` without changes when `id` is unknown or names the
    /// last remaining workspace. Deleting the current workspace moves the
    /// pointer to the first remaining one.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let Some(index) = self.workspaces.iter().position(|w| w.id == id) else {
            return false;
        };
        if self.workspaces.len() <= 1 {
            warn!(%id, "refusing to delete the last workspace");
            return false;
        }

        self.workspaces.remove(index);
        if self.current_id == id {
            self.current_id = self.workspaces[0].id;
        }
        debug!(%id, "deleted workspace");
        true
    }

    /// Makes `id` current. Returns `false` (no-op) when unknown.
    pub fn switch(&mut self, id: Uuid) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.current_id = id;
        true
    }

    /// Replaces the current document from full text.
    ///
    /// With a valid header, both header and body are replaced. Without one,
    /// the whole text becomes the body and the existing header is kept, so
    /// deleting the header text does not clear the metadata.
    pub fn update_raw_text(&mut self, text: &str) {
        let parsed = frontmatter::parse(text);
        let ws = self.current_mut();
        if let Some(fm) = parsed.frontmatter {
            ws.frontmatter = fm;
        }
        ws.content = parsed.content;
        ws.touch();
    }

    /// Replaces the current body, keeping the header.
    pub fn update_content(&mut self, content: impl Into<String>) {
        let ws = self.current_mut();
        ws.content = content.into();
        ws.touch();
    }

    /// Stores edited projects as the current body.
    pub fn update_projects(&mut self, projects: &[Project]) {
        self.update_content(serialize_to_text(projects));
    }

    /// Imports a shared document.
    ///
    /// The workspace name comes from the document header, or the configured
    /// shared name when it has none. On a name collision without a
    /// `resolution`, nothing changes and [`ImportOutcome::Conflict`] is
    /// returned so the caller can ask the user.
    pub fn import_shared(
        &mut self,
        text: &str,
        resolution: Option<ConflictResolution>,
    ) -> ImportOutcome {
        let parsed = frontmatter::parse(text);
        let name = parsed
            .frontmatter
            .as_ref()
            .map_or_else(|| self.config.shared_name.clone(), |fm| fm.name.clone());
        let names = self.names();
        let collides = names.contains(&name);

        match resolution {
            None if collides => return ImportOutcome::Conflict { name },
            Some(ConflictResolution::Cancel) => return ImportOutcome::Cancelled,
            Some(ConflictResolution::Overwrite) if collides => {
                if let Some(existing) = self.workspaces.iter_mut().find(|w| w.frontmatter.name == name) {
                    existing.frontmatter = parsed
                        .frontmatter
                        .unwrap_or_else(|| Frontmatter::new(name.clone()));
                    existing.content = parsed.content;
                    existing.touch();
                    let id = existing.id;
                    self.current_id = id;
                    debug!(%id, %name, "overwrote workspace from import");
                    return ImportOutcome::Imported { id };
                }
            }
            _ => {}
        }

        let final_name = if collides && resolution == Some(ConflictResolution::Rename) {
            generate_unique_name(&name, &names)
        } else {
            name
        };
        let mut fm = parsed.frontmatter.unwrap_or_else(|| Frontmatter::new(""));
        fm.name = final_name;

        let ws = Workspace::new(fm, parsed.content);
        let id = ws.id;
        debug!(%id, name = ws.name(), "imported workspace");
        self.workspaces.push(ws);
        self.current_id = id;
        ImportOutcome::Imported { id }
    }

    fn current_index(&self) -> usize {
        self.workspaces
            .iter()
            .position(|w| w.id == self.current_id)
            .unwrap_or(0)
    }

    fn current_mut(&mut self) -> &mut Workspace {
        let index = self.current_index();
        &mut self.workspaces[index]
    }
}

impl Default for Workspaces {
    fn default() -> Self {
        Self::new(WorkspaceConfig::default())
    }
}

fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
