//! Bounded saved-build snapshots.
//!
//! A build snapshots the current vehicle, its installed parts (by id plus
//! install timestamp) and the metrics at save time. The list is bounded and
//! ordered most-recently-saved first; saving again for the same vehicle
//! overwrites the existing entry in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{PartId, VehicleId};
use crate::error::{GarageError, Result};
use crate::performance::PerformanceMetrics;

/// Maximum number of saved builds retained.
pub const MAX_SAVED_BUILDS: usize = 10;

/// An installed part reduced to its persistable identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstalledPartSnapshot {
    /// Catalog id of the installed part.
    pub part_id: PartId,
    /// When the part was installed.
    pub installed_at: DateTime<Utc>,
}

/// A named snapshot of a configured vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBuild {
    /// Unique build id.
    pub id: String,
    /// User-visible build name.
    pub name: String,
    /// Vehicle this build configures.
    pub vehicle_id: VehicleId,
    /// Vehicle model name at save time.
    pub vehicle_name: String,
    /// Vehicle manufacturer at save time.
    pub manufacturer: String,
    /// Vehicle model year at save time.
    pub year: u16,
    /// Installed parts by id and timestamp.
    pub installed_parts: Vec<InstalledPartSnapshot>,
    /// Metrics at save time.
    pub metrics: PerformanceMetrics,
    /// When the build was saved.
    pub saved_at: DateTime<Utc>,
}

/// Bounded, most-recently-saved-first list of builds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildList {
    builds: Vec<SavedBuild>,
}

impl BuildList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self { builds: Vec::new() }
    }

    /// All builds, most recently saved first.
    #[must_use]
    pub fn as_slice(&self) -> &[SavedBuild] {
        &self.builds
    }

    /// Number of saved builds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builds.len()
    }

    /// Check whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }

    /// Look up a build by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SavedBuild> {
        self.builds.iter().find(|b| b.id == id)
    }

    /// The most recently saved build, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&SavedBuild> {
        self.builds.first()
    }

    /// Store a build.
    ///
    /// A build for a vehicle already present overwrites that entry in place;
    /// otherwise the build is inserted at the front and the list truncated
    /// to [`MAX_SAVED_BUILDS`].
    pub fn save(&mut self, build: SavedBuild) -> &SavedBuild {
        if let Some(idx) = self
            .builds
            .iter()
            .position(|b| b.vehicle_id == build.vehicle_id)
        {
            self.builds[idx] = build;
            &self.builds[idx]
        } else {
            self.builds.insert(0, build);
            self.builds.truncate(MAX_SAVED_BUILDS);
            &self.builds[0]
        }
    }

    /// Delete a build by id.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::BuildNotFound`] if no build has this id.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let idx = self
            .builds
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| GarageError::BuildNotFound(id.to_string()))?;
        self.builds.remove(idx);
        Ok(())
    }
}

/// Everything the external storage collaborator persists for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarageSnapshot {
    /// The currently selected vehicle, if any.
    pub vehicle_id: Option<VehicleId>,
    /// Installed parts of the current vehicle, by id and timestamp.
    pub installed_parts: Vec<InstalledPartSnapshot>,
    /// All saved builds, most recently saved first.
    pub saved_builds: Vec<SavedBuild>,
}
