//! Part catalog records.
//!
//! Parts are immutable catalog entries: the session only ever references
//! them, never mutates them. All structs deserialize from RON catalog files.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vehicle::{Drivetrain, EngineLayout};

/// Unique string identifier for a part.
///
/// Catalog data uses human-readable ids such as `"turbo-kit-stage2"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartId(pub String);

impl PartId {
    /// Create a new part id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of functional part slots.
///
/// A category is pure identity: it names what the part *is*. Whether two
/// parts of the same category may coexist is decided by [`SlotPolicy`],
/// never by the category tag itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum PartCategory {
    Engine,
    Turbo,
    Supercharger,
    Exhaust,
    Intake,
    Ecu,
    Electronics,
    Transmission,
    Clutch,
    Differential,
    Driveshaft,
    Suspension,
    Chassis,
    Brakes,
    Wheels,
    Tires,
    Bodykit,
    Aero,
    Exterior,
    Lighting,
    Interior,
    Seats,
    Safety,
    Gauges,
    Fuel,
    Cooling,
    Nitrous,
}

impl PartCategory {
    /// All categories in display order.
    pub const ALL: [Self; 27] = [
        Self::Engine,
        Self::Turbo,
        Self::Supercharger,
        Self::Exhaust,
        Self::Intake,
        Self::Ecu,
        Self::Electronics,
        Self::Transmission,
        Self::Clutch,
        Self::Differential,
        Self::Driveshaft,
        Self::Suspension,
        Self::Chassis,
        Self::Brakes,
        Self::Wheels,
        Self::Tires,
        Self::Bodykit,
        Self::Aero,
        Self::Exterior,
        Self::Lighting,
        Self::Interior,
        Self::Seats,
        Self::Safety,
        Self::Gauges,
        Self::Fuel,
        Self::Cooling,
        Self::Nitrous,
    ];

    /// Get the display name for this category.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Engine => "Engine",
            Self::Turbo => "Turbocharger",
            Self::Supercharger => "Supercharger",
            Self::Exhaust => "Exhaust",
            Self::Intake => "Intake",
            Self::Ecu => "ECU",
            Self::Electronics => "Electronics",
            Self::Transmission => "Transmission",
            Self::Clutch => "Clutch",
            Self::Differential => "Differential",
            Self::Driveshaft => "Driveshaft",
            Self::Suspension => "Suspension",
            Self::Chassis => "Chassis",
            Self::Brakes => "Brakes",
            Self::Wheels => "Wheels",
            Self::Tires => "Tires",
            Self::Bodykit => "Body Kit",
            Self::Aero => "Aerodynamics",
            Self::Exterior => "Exterior",
            Self::Lighting => "Lighting",
            Self::Interior => "Interior",
            Self::Seats => "Seats",
            Self::Safety => "Safety",
            Self::Gauges => "Gauges",
            Self::Fuel => "Fuel System",
            Self::Cooling => "Cooling",
            Self::Nitrous => "Nitrous",
        }
    }

    /// Stable ordering index used for deterministic iteration.
    #[must_use]
    pub fn order(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(usize::MAX)
    }

    /// The slot policy governing this category.
    ///
    /// Every category currently maps to [`SlotPolicy::Exclusive`]: installing
    /// a part into an occupied category replaces the occupant. The policy is
    /// a table rather than a hardcoded branch so that the exclusivity rule
    /// stays an explicit, auditable decision per category.
    #[must_use]
    pub const fn slot_policy(self) -> SlotPolicy {
        match self {
            // Driveline and power-adder slots are physically single-slot.
            Self::Engine
            | Self::Turbo
            | Self::Supercharger
            | Self::Transmission
            | Self::Clutch
            | Self::Differential
            | Self::Ecu => SlotPolicy::Exclusive,
            // Every remaining category also replaces by category: one set of
            // wheels, one aero package, one interior at a time.
            _ => SlotPolicy::Exclusive,
        }
    }
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Slot-exclusivity policy for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotPolicy {
    /// At most one installed part of this category; installing replaces.
    Exclusive,
    /// Multiple parts of this category may coexist.
    ///
    /// No category maps to this today; the install flow honors it if a
    /// category ever does.
    Stacking,
}

/// Engine mount family a part bolts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum MountType {
    Inline4,
    Inline6,
    V6,
    V8,
    V10,
    V12,
    Flat4,
    Flat6,
    Rotary,
    Electric,
}

impl MountType {
    /// Get the display name for this mount type.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Inline4 => "inline-4",
            Self::Inline6 => "inline-6",
            Self::V6 => "V6",
            Self::V8 => "V8",
            Self::V10 => "V10",
            Self::V12 => "V12",
            Self::Flat4 => "flat-4",
            Self::Flat6 => "flat-6",
            Self::Rotary => "rotary",
            Self::Electric => "electric",
        }
    }
}

/// Wheel bolt pattern.
///
/// Serialized as its conventional tag (`"5x114.3"`, ...) so catalog files
/// stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[allow(missing_docs)]
pub enum BoltPattern {
    FourBy100,
    FourBy108,
    FourBy114_3,
    FiveBy100,
    FiveBy108,
    FiveBy112,
    FiveBy114_3,
    FiveBy115,
    FiveBy120,
    FiveBy130,
}

impl TryFrom<String> for BoltPattern {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "4x100" => Ok(Self::FourBy100),
            "4x108" => Ok(Self::FourBy108),
            "4x114.3" => Ok(Self::FourBy114_3),
            "5x100" => Ok(Self::FiveBy100),
            "5x108" => Ok(Self::FiveBy108),
            "5x112" => Ok(Self::FiveBy112),
            "5x114.3" => Ok(Self::FiveBy114_3),
            "5x115" => Ok(Self::FiveBy115),
            "5x120" => Ok(Self::FiveBy120),
            "5x130" => Ok(Self::FiveBy130),
            other => Err(format!("unknown bolt pattern: {other}")),
        }
    }
}

impl From<BoltPattern> for String {
    fn from(value: BoltPattern) -> Self {
        value.display_name().to_string()
    }
}

impl BoltPattern {
    /// Get the display name for this bolt pattern, e.g. `"5x114.3"`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::FourBy100 => "4x100",
            Self::FourBy108 => "4x108",
            Self::FourBy114_3 => "4x114.3",
            Self::FiveBy100 => "5x100",
            Self::FiveBy108 => "5x108",
            Self::FiveBy112 => "5x112",
            Self::FiveBy114_3 => "5x114.3",
            Self::FiveBy115 => "5x115",
            Self::FiveBy120 => "5x120",
            Self::FiveBy130 => "5x130",
        }
    }
}

/// Sparse stat modifiers contributed by a part.
///
/// Fixed struct with explicitly optional fields. An absent field contributes
/// the modifier's identity value: 0 for additive fields, 1 for
/// multiplicative fields. [`PartStats::default`] is therefore the identity
/// contribution.
///
/// # Example RON
///
/// ```ron
/// PartStats(
///     horsepower_add: Some(120.0),
///     torque_add: Some(150.0),
///     boost_pressure: Some(1.2),
/// )
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartStats {
    /// Flat horsepower added before any multiplier applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horsepower_add: Option<f64>,

    /// Horsepower scale factor, applied to the additive subtotal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horsepower_multiplier: Option<f64>,

    /// Flat torque added (Nm).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torque_add: Option<f64>,

    /// Torque scale factor, applied to the additive subtotal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torque_multiplier: Option<f64>,

    /// Mass removed from the vehicle (kg). Negative values model parts that
    /// add mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_reduction: Option<f64>,

    /// Downforce added (kg at reference speed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downforce_add: Option<f64>,

    /// Drag reduction in percentage points, accumulated across parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_reduction: Option<f64>,

    /// Braking force multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub braking_power: Option<f64>,

    /// Tire grip multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tire_grip: Option<f64>,

    /// Engine rev limit override (rpm).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev_limit: Option<u32>,

    /// Rated boost pressure (bar) for forced-induction parts. Tuning a
    /// boost target above this value adds horsepower during aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost_pressure: Option<f64>,
}

impl PartStats {
    /// Check whether every field is absent (pure identity contribution).
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Compatibility rule set evaluated by the resolver.
///
/// An empty list or unset option is a wildcard: the axis accepts every
/// vehicle. This lets generic parts (universal wheels, gauges) skip
/// irrelevant checks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompatibilityRules {
    /// Engine mount families the part fits. Empty = any.
    #[serde(default)]
    pub mount_types: Vec<MountType>,

    /// Drivetrains the part requires. Empty = any.
    #[serde(default)]
    pub drivetrains: Vec<Drivetrain>,

    /// Engine layouts the part requires. Empty = any.
    #[serde(default)]
    pub engine_layouts: Vec<EngineLayout>,

    /// Minimum engine bay volume in liters. Unset or 0 = any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_engine_bay_size: Option<f64>,

    /// Bolt patterns the part fits (wheels). Empty = any.
    #[serde(default)]
    pub bolt_patterns: Vec<BoltPattern>,

    /// Part ids that must already be installed.
    #[serde(default)]
    pub required_parts: Vec<PartId>,

    /// Part ids that cannot coexist with this part.
    #[serde(default)]
    pub conflicting_parts: Vec<PartId>,

    /// Advisory total-weight ceiling (kg). Exceeding it produces a warning,
    /// never a rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<f64>,
}

impl CompatibilityRules {
    /// Check whether every axis is a wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.mount_types.is_empty()
            && self.drivetrains.is_empty()
            && self.engine_layouts.is_empty()
            && self.min_engine_bay_size.map_or(true, |s| s <= 0.0)
            && self.bolt_patterns.is_empty()
            && self.required_parts.is_empty()
            && self.conflicting_parts.is_empty()
    }
}

/// An immutable catalog part.
///
/// # Example RON
///
/// ```ron
/// Part(
///     id: "turbo-kit-stage2",
///     name: "Stage 2 Turbo Kit",
///     brand: "Boostwerks",
///     category: turbo,
///     price: 8500,
///     weight: 18.0,
///     compatibility: CompatibilityRules(
///         mount_types: [inline6, v6],
///         min_engine_bay_size: Some(2.5),
///     ),
///     stats: PartStats(
///         horsepower_add: Some(120.0),
///         torque_add: Some(150.0),
///         boost_pressure: Some(1.2),
///     ),
///     description: "Twin-scroll turbocharger with intercooler piping.",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Unique identifier for this part.
    pub id: PartId,
    /// Display name.
    pub name: String,
    /// Manufacturer brand.
    pub brand: String,
    /// Functional slot this part occupies.
    pub category: PartCategory,
    /// Price in currency units.
    pub price: i64,
    /// Physical mass in kg (catalog data; consumed by advisory checks).
    pub weight: f64,
    /// Constraints evaluated by the compatibility resolver.
    #[serde(default)]
    pub compatibility: CompatibilityRules,
    /// Stat modifiers folded by the performance aggregator.
    #[serde(default)]
    pub stats: PartStats,
    /// Catalog description text.
    #[serde(default)]
    pub description: String,
}

impl Part {
    /// Create a new part with wildcard compatibility and identity stats.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: PartCategory,
        price: i64,
        weight: f64,
    ) -> Self {
        Self {
            id: PartId::new(id),
            name: name.into(),
            brand: brand.into(),
            category,
            price,
            weight,
            compatibility: CompatibilityRules::default(),
            stats: PartStats::default(),
            description: String::new(),
        }
    }

    /// Set the stat modifiers.
    #[must_use]
    pub fn with_stats(mut self, stats: PartStats) -> Self {
        self.stats = stats;
        self
    }

    /// Set the compatibility rules.
    #[must_use]
    pub fn with_compatibility(mut self, rules: CompatibilityRules) -> Self {
        self.compatibility = rules;
        self
    }

    /// Set the description text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Semantic validation applied at catalog load time.
    ///
    /// Returns a list of problems; an empty list means the record is sound.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("name is empty".to_string());
        }
        if self.price < 0 {
            errors.push(format!("negative price: {}", self.price));
        }
        if self.weight < 0.0 {
            errors.push(format!("negative weight: {}", self.weight));
        }

        let stats = &self.stats;
        if stats.horsepower_multiplier.is_some_and(|m| m <= 0.0) {
            errors.push("horsepower_multiplier must be positive".to_string());
        }
        if stats.torque_multiplier.is_some_and(|m| m <= 0.0) {
            errors.push("torque_multiplier must be positive".to_string());
        }
        if stats.braking_power.is_some_and(|m| m <= 0.0) {
            errors.push("braking_power must be positive".to_string());
        }
        if stats.tire_grip.is_some_and(|m| m <= 0.0) {
            errors.push("tire_grip must be positive".to_string());
        }
        if stats.drag_reduction.is_some_and(|d| !(0.0..100.0).contains(&d)) {
            errors.push("drag_reduction must be within [0, 100)".to_string());
        }
        if stats.boost_pressure.is_some_and(|b| b < 0.0) {
            errors.push("boost_pressure must not be negative".to_string());
        }
        if self
            .compatibility
            .min_engine_bay_size
            .is_some_and(|s| s < 0.0)
        {
            errors.push("min_engine_bay_size must not be negative".to_string());
        }
        if self.compatibility.required_parts.contains(&self.id) {
            errors.push("part requires itself".to_string());
        }
        if self.compatibility.conflicting_parts.contains(&self.id) {
            errors.push("part conflicts with itself".to_string());
        }

        errors
    }
}
