//! Part and vehicle catalog data model.
//!
//! Pure data structures designed to be deserialized from RON catalog files.
//! This module contains no IO - file loading is handled by `garage_service`.

mod part;
mod registry;
mod vehicle;

pub use part::{
    BoltPattern, CompatibilityRules, MountType, Part, PartCategory, PartId, PartStats, SlotPolicy,
};
pub use registry::{PartRegistry, VehicleRegistry};
pub use vehicle::{
    BaseSpecs, Drivetrain, EngineLayout, EngineSpec, TransmissionSpec, TransmissionType, Vehicle,
    VehicleId,
};
