//! Catalog data validation.
//!
//! Per-record checks run inside the loader; this module adds the
//! cross-record checks a single record cannot see: dangling part
//! references and empty catalogs.

use std::path::Path;

use garage_core::catalog::{PartRegistry, VehicleRegistry};
use garage_service::loader::{self, CatalogLoadError};
use thiserror::Error;

/// Errors produced by catalog validation.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// A catalog file failed to load.
    #[error(transparent)]
    Load(#[from] CatalogLoadError),

    /// Cross-record checks found problems.
    #[error("{0} validation issue(s) found")]
    Issues(usize),
}

/// Validate a catalog directory containing `parts.ron` and `vehicles.ron`.
///
/// Every issue is logged at error level before the summary error returns.
///
/// # Errors
///
/// Returns [`ValidateError::Load`] if a file fails to load and
/// [`ValidateError::Issues`] if cross-record checks fail.
pub fn validate_catalog_dir(path: &Path) -> Result<(), ValidateError> {
    let parts = loader::load_parts(&path.join("parts.ron"))?;
    let vehicles = loader::load_vehicles(&path.join("vehicles.ron"))?;

    let issues = cross_reference_issues(&parts, &vehicles);
    for issue in &issues {
        tracing::error!("{issue}");
    }

    if issues.is_empty() {
        tracing::info!(
            parts = parts.len(),
            vehicles = vehicles.len(),
            "Catalog is consistent"
        );
        Ok(())
    } else {
        Err(ValidateError::Issues(issues.len()))
    }
}

/// Checks spanning multiple records.
#[must_use]
pub fn cross_reference_issues(parts: &PartRegistry, vehicles: &VehicleRegistry) -> Vec<String> {
    let mut issues = Vec::new();

    if parts.is_empty() {
        issues.push("part catalog is empty".to_string());
    }
    if vehicles.is_empty() {
        issues.push("vehicle catalog is empty".to_string());
    }

    for part in parts.iter() {
        for required in &part.compatibility.required_parts {
            if parts.get(required).is_none() {
                issues.push(format!(
                    "part '{}' requires unknown part '{required}'",
                    part.id
                ));
            }
        }
        for conflicting in &part.compatibility.conflicting_parts {
            if parts.get(conflicting).is_none() {
                issues.push(format!(
                    "part '{}' conflicts with unknown part '{conflicting}'",
                    part.id
                ));
            }
        }

        // A part no vehicle can mount is almost always a data entry error.
        // Parts with prerequisites are skipped: they only fit once their
        // required parts are installed, which stock templates never have.
        if part.compatibility.required_parts.is_empty() {
            let mountable = vehicles.iter().any(|vehicle| {
                garage_core::compat::check_compatibility(part, vehicle).is_compatible()
            });
            if !vehicles.is_empty() && !mountable {
                issues.push(format!("part '{}' fits no vehicle in the catalog", part.id));
            }
        }
    }

    issues
}
