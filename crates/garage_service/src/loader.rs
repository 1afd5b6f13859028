//! Catalog loading from RON files.
//!
//! Loads part and vehicle definitions into registries. All validation
//! happens at load time: a catalog that loads is a catalog the core can
//! trust.

use std::path::Path;

use garage_core::catalog::{Part, PartRegistry, Vehicle, VehicleRegistry};
use garage_core::performance::calculate_performance;
use thiserror::Error;

/// Errors that can occur during catalog loading.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// Failed to read file.
    #[error("Failed to read file '{path}': {source}")]
    Io {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON file.
    #[error("Failed to parse RON file '{path}': {source}")]
    Parse {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// A record failed semantic validation.
    #[error("Validation failed for '{id}' in '{path}': {errors:?}")]
    Validation {
        /// Path to the file.
        path: String,
        /// Id of the offending record.
        id: String,
        /// List of validation errors.
        errors: Vec<String>,
    },

    /// Two records share an id.
    #[error("Duplicate id in '{path}': {id}")]
    Duplicate {
        /// Path to the file.
        path: String,
        /// The duplicated id.
        id: String,
    },
}

/// Result type for catalog loading operations.
pub type CatalogLoadResult<T> = Result<T, CatalogLoadError>;

/// Load a part catalog from a RON file containing a list of parts.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a record fails
/// validation, or two records share an id.
pub fn load_parts(path: &Path) -> CatalogLoadResult<PartRegistry> {
    let source = read(path)?;
    parts_from_ron(&source, &path.display().to_string())
}

/// Load a vehicle catalog from a RON file containing a list of templates.
///
/// Metrics omitted by the file are recomputed from the base specs, so every
/// template leaves the loader internally consistent.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a record fails
/// validation, or two records share an id.
pub fn load_vehicles(path: &Path) -> CatalogLoadResult<VehicleRegistry> {
    let source = read(path)?;
    vehicles_from_ron(&source, &path.display().to_string())
}

/// Parse a part catalog from RON source text.
///
/// # Errors
///
/// Same failure modes as [`load_parts`], minus IO.
pub fn parts_from_ron(source: &str, origin: &str) -> CatalogLoadResult<PartRegistry> {
    let parts: Vec<Part> = ron::from_str(source).map_err(|source| CatalogLoadError::Parse {
        path: origin.to_string(),
        source,
    })?;

    let mut registry = PartRegistry::new();
    for part in parts {
        let errors = part.validate();
        if !errors.is_empty() {
            return Err(CatalogLoadError::Validation {
                path: origin.to_string(),
                id: part.id.to_string(),
                errors,
            });
        }
        let id = part.id.clone();
        if registry.register(part).is_err() {
            return Err(CatalogLoadError::Duplicate {
                path: origin.to_string(),
                id: id.to_string(),
            });
        }
    }

    tracing::info!(origin, parts = registry.len(), "Part catalog loaded");
    Ok(registry)
}

/// Parse a vehicle catalog from RON source text.
///
/// # Errors
///
/// Same failure modes as [`load_vehicles`], minus IO.
pub fn vehicles_from_ron(source: &str, origin: &str) -> CatalogLoadResult<VehicleRegistry> {
    let vehicles: Vec<Vehicle> = ron::from_str(source).map_err(|source| CatalogLoadError::Parse {
        path: origin.to_string(),
        source,
    })?;

    let mut registry = VehicleRegistry::new();
    for mut vehicle in vehicles {
        let errors = vehicle.validate();
        if !errors.is_empty() {
            return Err(CatalogLoadError::Validation {
                path: origin.to_string(),
                id: vehicle.id.to_string(),
                errors,
            });
        }
        // Catalog files omit metrics; templates ship ready to select.
        vehicle.installed_parts.clear();
        vehicle.current_metrics = calculate_performance(&vehicle);

        let id = vehicle.id.clone();
        if registry.register(vehicle).is_err() {
            return Err(CatalogLoadError::Duplicate {
                path: origin.to_string(),
                id: id.to_string(),
            });
        }
    }

    tracing::info!(origin, vehicles = registry.len(), "Vehicle catalog loaded");
    Ok(registry)
}

fn read(path: &Path) -> CatalogLoadResult<String> {
    std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.display().to_string(),
        source,
    })
}
