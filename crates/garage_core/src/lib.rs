//! # Garage Core
//!
//! Deterministic vehicle configuration and performance simulation core.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No network
//!
//! This separation enables:
//! - Headless catalog tooling
//! - Property-based testing of the whole install/uninstall surface
//! - Reuse behind any UI layer
//!
//! ## Crate Structure
//!
//! - [`catalog`] - Part and vehicle catalog data model and registries
//! - [`compat`] - Compatibility resolver (pure predicate)
//! - [`economy`] - Currency ledger
//! - [`performance`] - Performance aggregator (pure function)
//! - [`garage`] - Configuration session: atomic install/uninstall transactions
//! - [`builds`] - Bounded saved-build snapshots
//! - [`livery`] - Vehicle-scoped paint and finish state

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builds;
pub mod catalog;
pub mod compat;
pub mod economy;
pub mod error;
pub mod garage;
pub mod livery;
pub mod performance;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::builds::{GarageSnapshot, SavedBuild, MAX_SAVED_BUILDS};
    pub use crate::catalog::{
        BaseSpecs, BoltPattern, CompatibilityRules, Drivetrain, EngineLayout, EngineSpec,
        MountType, Part, PartCategory, PartId, PartRegistry, PartStats, SlotPolicy,
        TransmissionSpec, TransmissionType, Vehicle, VehicleId, VehicleRegistry,
    };
    pub use crate::compat::{check_compatibility, Compatibility, CompatibilityAxis};
    pub use crate::economy::{AccountKind, Ledger, STARTING_BALANCE};
    pub use crate::error::{GarageError, Result};
    pub use crate::garage::{GarageSession, InstallOutcome, InstalledPart, TuningSettings};
    pub use crate::performance::{calculate_performance, PerformanceMetrics};
}
