//! Best-effort snapshot persistence.
//!
//! The in-memory session is the source of truth and always updates
//! synchronously; persisting a [`GarageSnapshot`] is a fire-and-forget
//! background write. A failed write is logged and dropped - it never flows
//! back into the core state machine. Eventual consistency between local
//! and remote state is accepted.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use garage_core::builds::GarageSnapshot;
use thiserror::Error;

/// Errors that can occur while persisting a snapshot.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Snapshot could not be serialized.
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Snapshot could not be written or read.
    #[error("Snapshot IO failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A place snapshots can be saved to and restored from.
///
/// Implementations must be cheap to share across threads; the background
/// writer calls [`GarageStore::save`] from a blocking task.
pub trait GarageStore: Send + Sync {
    /// Persist a snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] when the snapshot cannot be stored.
    fn save(&self, snapshot: &GarageSnapshot) -> Result<(), PersistError>;

    /// Load the most recently saved snapshot, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] when a stored snapshot cannot be read.
    fn load(&self) -> Result<Option<GarageSnapshot>, PersistError>;
}

/// Snapshot store backed by a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store writing to the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store writes to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl GarageStore for JsonFileStore {
    fn save(&self, snapshot: &GarageSnapshot) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<GarageSnapshot>, PersistError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }
}

/// In-memory store for tests and demo sessions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    snapshot: Mutex<Option<GarageSnapshot>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GarageStore for InMemoryStore {
    fn save(&self, snapshot: &GarageSnapshot) -> Result<(), PersistError> {
        *self.snapshot.lock().expect("snapshot lock poisoned") = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<GarageSnapshot>, PersistError> {
        Ok(self.snapshot.lock().expect("snapshot lock poisoned").clone())
    }
}

/// Persist a snapshot in the background, without blocking the caller.
///
/// The write is best-effort: failure is logged at warn level and otherwise
/// dropped. The returned handle is only useful for tests that want to wait
/// for the write to finish; production callers are expected to ignore it.
pub fn persist_in_background(
    store: Arc<dyn GarageStore>,
    snapshot: GarageSnapshot,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || match store.save(&snapshot) {
        Ok(()) => tracing::debug!("Snapshot persisted"),
        Err(error) => {
            tracing::warn!(%error, "Snapshot persistence failed; in-memory state is unaffected");
        }
    })
}
