//! Error types for the configuration core.

use thiserror::Error;

use crate::catalog::{PartId, VehicleId};
use crate::compat::CompatibilityAxis;

/// Result type alias using [`GarageError`].
pub type Result<T> = std::result::Result<T, GarageError>;

/// Top-level error type for all configuration-core errors.
///
/// Every failure crosses the public contract as a value, never as a panic.
/// The core reports the kind plus a machine-usable reason; user-facing
/// messaging belongs to the calling layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GarageError {
    /// An install/uninstall was attempted with no current vehicle.
    #[error("No vehicle selected")]
    VehicleNotSelected,

    /// A compatibility axis rejected the part.
    #[error("Incompatible part: {reason}")]
    IncompatiblePart {
        /// The axis that failed.
        axis: CompatibilityAxis,
        /// Human-readable explanation naming the failing axis.
        reason: String,
    },

    /// Balance is below the part price after any same-category refund.
    #[error("Insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        /// Amount the transaction required.
        required: i64,
        /// Balance available at the time of the attempt.
        available: i64,
    },

    /// Saved build lookup failed.
    #[error("Saved build not found: {0}")]
    BuildNotFound(String),

    /// A part id was not present in the catalog.
    #[error("Unknown part: {0}")]
    UnknownPart(PartId),

    /// A vehicle id was not present in the catalog.
    #[error("Unknown vehicle: {0}")]
    UnknownVehicle(VehicleId),

    /// A part with this id is already registered.
    #[error("Duplicate part id: {0}")]
    DuplicatePart(PartId),

    /// A vehicle with this id is already registered.
    #[error("Duplicate vehicle id: {0}")]
    DuplicateVehicle(VehicleId),
}
