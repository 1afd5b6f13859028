//! Vehicle catalog records.
//!
//! Vehicles are read from the catalog as templates and become mutable
//! working copies once selected by a [`GarageSession`].
//!
//! [`GarageSession`]: crate::garage::GarageSession

use std::fmt;

use serde::{Deserialize, Serialize};

use super::part::BoltPattern;
use crate::garage::InstalledPart;
use crate::performance::PerformanceMetrics;

/// Unique string identifier for a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl VehicleId {
    /// Create a new vehicle id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Driven-wheel configuration.
///
/// Serialized as its display tag (`"FWD"`, `"4WD"`, ...) so catalog files
/// keep the conventional notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[allow(missing_docs)]
pub enum Drivetrain {
    Fwd,
    Rwd,
    Awd,
    FourWd,
}

impl TryFrom<String> for Drivetrain {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "FWD" => Ok(Self::Fwd),
            "RWD" => Ok(Self::Rwd),
            "AWD" => Ok(Self::Awd),
            "4WD" => Ok(Self::FourWd),
            other => Err(format!("unknown drivetrain: {other}")),
        }
    }
}

impl From<Drivetrain> for String {
    fn from(value: Drivetrain) -> Self {
        value.display_name().to_string()
    }
}

impl Drivetrain {
    /// Get the display name for this drivetrain.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Fwd => "FWD",
            Self::Rwd => "RWD",
            Self::Awd => "AWD",
            Self::FourWd => "4WD",
        }
    }

    /// Fraction of crank power lost between the flywheel and the wheels.
    #[must_use]
    pub const fn power_loss(self) -> f64 {
        match self {
            Self::Fwd | Self::Rwd => 0.15,
            Self::Awd => 0.20,
            Self::FourWd => 0.22,
        }
    }
}

/// Longitudinal engine placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum EngineLayout {
    Front,
    Mid,
    Rear,
}

impl EngineLayout {
    /// Get the display name for this layout.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Mid => "mid",
            Self::Rear => "rear",
        }
    }
}

/// Gearbox family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum TransmissionType {
    Manual,
    Automatic,
    Dct,
    Cvt,
    Sequential,
}

/// Engine block specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSpec {
    /// Mount family used for part fitment checks.
    pub mount: super::part::MountType,
    /// Displacement in liters.
    pub displacement: f64,
    /// Cylinder count.
    pub cylinders: u8,
    /// True for engines without factory forced induction.
    pub naturally_aspirated: bool,
    /// Crank horsepower with no parts installed.
    pub base_horsepower: f64,
    /// Crank torque (Nm) with no parts installed.
    pub base_torque: f64,
    /// Factory rev limit (rpm).
    pub redline: u32,
}

/// Transmission specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionSpec {
    /// Gearbox family.
    pub kind: TransmissionType,
    /// Forward gear count.
    pub gears: u8,
}

/// Factory specification of a vehicle, never mutated by part installs.
///
/// # Example RON
///
/// ```ron
/// BaseSpecs(
///     engine: EngineSpec(
///         mount: inline6,
///         displacement: 2.6,
///         cylinders: 6,
///         naturally_aspirated: false,
///         base_horsepower: 276.0,
///         base_torque: 392.0,
///         redline: 8000,
///     ),
///     drivetrain: "AWD",
///     engine_layout: front,
///     transmission: TransmissionSpec(kind: manual, gears: 6),
///     weight: 1560.0,
///     wheelbase: 2665.0,
///     track_width: 1480.0,
///     engine_bay_size: 3.2,
///     bolt_pattern: "5x114.3",
///     drag_coefficient: 0.34,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseSpecs {
    /// Engine block.
    pub engine: EngineSpec,
    /// Driven-wheel configuration.
    pub drivetrain: Drivetrain,
    /// Engine placement.
    pub engine_layout: EngineLayout,
    /// Gearbox.
    pub transmission: TransmissionSpec,
    /// Curb weight in kg.
    pub weight: f64,
    /// Wheelbase in mm.
    pub wheelbase: f64,
    /// Track width in mm.
    pub track_width: f64,
    /// Engine bay volume in liters, used for fitment checks.
    pub engine_bay_size: f64,
    /// Factory wheel bolt pattern.
    pub bolt_pattern: BoltPattern,
    /// Factory drag coefficient, scaled down by aero parts.
    pub drag_coefficient: f64,
}

/// A vehicle: catalog template or mutable working copy.
///
/// Catalog templates carry an empty installed set and metrics computed from
/// base specs alone. Selecting a vehicle clones the template into a working
/// copy; selecting a different vehicle destroys the copy and every override
/// with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier.
    pub id: VehicleId,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Model name.
    pub name: String,
    /// Model year.
    pub year: u16,
    /// Factory specification.
    pub base_specs: BaseSpecs,
    /// Installed parts, in install order.
    #[serde(default)]
    pub installed_parts: Vec<InstalledPart>,
    /// Cached metrics for the current installed set. Refreshed by the
    /// session after every mutation; a pure projection, never patched.
    /// Defaults to zeros in catalog files - loaders recompute it.
    #[serde(default)]
    pub current_metrics: PerformanceMetrics,
}

impl Vehicle {
    /// Create a catalog template with no installed parts.
    ///
    /// Metrics are computed from the base specs.
    #[must_use]
    pub fn template(
        id: impl Into<String>,
        manufacturer: impl Into<String>,
        name: impl Into<String>,
        year: u16,
        base_specs: BaseSpecs,
    ) -> Self {
        let mut vehicle = Self {
            id: VehicleId::new(id),
            manufacturer: manufacturer.into(),
            name: name.into(),
            year,
            base_specs,
            installed_parts: Vec::new(),
            current_metrics: PerformanceMetrics::default(),
        };
        vehicle.current_metrics = crate::performance::calculate_performance(&vehicle);
        vehicle
    }

    /// Find an installed part by id.
    #[must_use]
    pub fn installed_part(&self, id: &super::part::PartId) -> Option<&InstalledPart> {
        self.installed_parts.iter().find(|ip| ip.part.id == *id)
    }

    /// Find the installed part occupying a category, if any.
    #[must_use]
    pub fn part_in_category(&self, category: super::part::PartCategory) -> Option<&InstalledPart> {
        self.installed_parts
            .iter()
            .find(|ip| ip.part.category == category)
    }

    /// Full display name, e.g. `"Nissan Skyline GT-R (1999)"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.manufacturer, self.name, self.year)
    }

    /// Semantic validation applied at catalog load time.
    ///
    /// Returns a list of problems; an empty list means the record is sound.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let specs = &self.base_specs;

        if self.name.trim().is_empty() {
            errors.push("name is empty".to_string());
        }
        if specs.engine.base_horsepower <= 0.0 {
            errors.push("base_horsepower must be positive".to_string());
        }
        if specs.engine.base_torque <= 0.0 {
            errors.push("base_torque must be positive".to_string());
        }
        if specs.engine.cylinders == 0 && specs.engine.mount != super::part::MountType::Electric {
            errors.push("cylinder count must be positive".to_string());
        }
        if specs.weight <= 0.0 {
            errors.push("weight must be positive".to_string());
        }
        if specs.engine_bay_size <= 0.0 {
            errors.push("engine_bay_size must be positive".to_string());
        }
        if specs.drag_coefficient <= 0.0 {
            errors.push("drag_coefficient must be positive".to_string());
        }
        if specs.transmission.gears == 0 {
            errors.push("gear count must be positive".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MountType;

    fn specs() -> BaseSpecs {
        BaseSpecs {
            engine: EngineSpec {
                mount: MountType::Inline6,
                displacement: 2.6,
                cylinders: 6,
                naturally_aspirated: false,
                base_horsepower: 276.0,
                base_torque: 392.0,
                redline: 8000,
            },
            drivetrain: Drivetrain::Awd,
            engine_layout: EngineLayout::Front,
            transmission: TransmissionSpec {
                kind: TransmissionType::Manual,
                gears: 6,
            },
            weight: 1560.0,
            wheelbase: 2665.0,
            track_width: 1480.0,
            engine_bay_size: 3.2,
            bolt_pattern: BoltPattern::FiveBy114_3,
            drag_coefficient: 0.34,
        }
    }

    #[test]
    fn template_computes_base_metrics() {
        let vehicle = Vehicle::template("skyline-r34", "Nissan", "Skyline GT-R", 1999, specs());

        assert!(vehicle.installed_parts.is_empty());
        assert_eq!(vehicle.current_metrics.horsepower, 276.0);
        assert_eq!(vehicle.current_metrics.torque, 392.0);
        assert_eq!(vehicle.current_metrics.weight, 1560.0);
    }

    #[test]
    fn drivetrain_loss_table() {
        assert_eq!(Drivetrain::Fwd.power_loss(), 0.15);
        assert_eq!(Drivetrain::Rwd.power_loss(), 0.15);
        assert_eq!(Drivetrain::Awd.power_loss(), 0.20);
        assert_eq!(Drivetrain::FourWd.power_loss(), 0.22);
    }

    #[test]
    fn display_name_includes_year() {
        let vehicle = Vehicle::template("skyline-r34", "Nissan", "Skyline GT-R", 1999, specs());
        assert_eq!(vehicle.display_name(), "Nissan Skyline GT-R (1999)");
    }
}
