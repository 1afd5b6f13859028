//! Compatibility resolver.
//!
//! A pure predicate deciding whether a part may be attached to a vehicle.
//! Axes are evaluated in a fixed order and the first failure wins; the
//! verdict names the failing axis. Neither argument is ever mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Part, PartCategory, Vehicle};

/// One independent constraint dimension evaluated by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityAxis {
    /// Engine mount family.
    MountType,
    /// Driven-wheel configuration.
    Drivetrain,
    /// Engine placement.
    EngineLayout,
    /// Engine bay volume.
    EngineBaySize,
    /// Wheel bolt pattern.
    BoltPattern,
    /// Prerequisite parts that must already be installed.
    RequiredParts,
    /// Parts that cannot coexist with the candidate.
    ConflictingParts,
}

impl CompatibilityAxis {
    /// Get the display name for this axis.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MountType => "mount type",
            Self::Drivetrain => "drivetrain",
            Self::EngineLayout => "engine layout",
            Self::EngineBaySize => "engine bay size",
            Self::BoltPattern => "bolt pattern",
            Self::RequiredParts => "required parts",
            Self::ConflictingParts => "conflicting parts",
        }
    }
}

impl fmt::Display for CompatibilityAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Verdict of a compatibility check.
#[derive(Debug, Clone, PartialEq)]
pub enum Compatibility {
    /// The part fits. Warnings are non-blocking advisories.
    Compatible {
        /// Advisory notes that do not prevent installation.
        warnings: Vec<String>,
    },
    /// The part does not fit.
    Incompatible {
        /// The axis that rejected the part.
        axis: CompatibilityAxis,
        /// Human-readable explanation naming the failing axis.
        reason: String,
    },
}

impl Compatibility {
    /// True when the part may be installed.
    #[must_use]
    pub const fn is_compatible(&self) -> bool {
        matches!(self, Self::Compatible { .. })
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Compatible { .. } => None,
            Self::Incompatible { reason, .. } => Some(reason),
        }
    }
}

/// Check whether a part may be attached to a vehicle.
///
/// Each rule is evaluated independently and all must pass. An empty
/// constraint list is a wildcard: the axis accepts any vehicle. Evaluation
/// short-circuits on the first failing axis.
///
/// This function is pure: same arguments, same verdict, no side effects.
#[must_use]
pub fn check_compatibility(part: &Part, vehicle: &Vehicle) -> Compatibility {
    let rules = &part.compatibility;
    let specs = &vehicle.base_specs;

    if !rules.mount_types.is_empty() && !rules.mount_types.contains(&specs.engine.mount) {
        let accepted = join(rules.mount_types.iter().map(|m| m.display_name()));
        return Compatibility::Incompatible {
            axis: CompatibilityAxis::MountType,
            reason: format!(
                "mount type mismatch: fits {accepted} engines, this vehicle has a {} engine",
                specs.engine.mount.display_name()
            ),
        };
    }

    if !rules.drivetrains.is_empty() && !rules.drivetrains.contains(&specs.drivetrain) {
        let accepted = join(rules.drivetrains.iter().map(|d| d.display_name()));
        return Compatibility::Incompatible {
            axis: CompatibilityAxis::Drivetrain,
            reason: format!(
                "drivetrain mismatch: requires {accepted}, this vehicle is {}",
                specs.drivetrain.display_name()
            ),
        };
    }

    if !rules.engine_layouts.is_empty() && !rules.engine_layouts.contains(&specs.engine_layout) {
        let accepted = join(rules.engine_layouts.iter().map(|l| l.display_name()));
        return Compatibility::Incompatible {
            axis: CompatibilityAxis::EngineLayout,
            reason: format!(
                "engine layout mismatch: requires a {accepted} engine, this vehicle has a {} engine",
                specs.engine_layout.display_name()
            ),
        };
    }

    if let Some(min_bay) = rules.min_engine_bay_size {
        if min_bay > 0.0 && specs.engine_bay_size < min_bay {
            return Compatibility::Incompatible {
                axis: CompatibilityAxis::EngineBaySize,
                reason: format!(
                    "engine bay too small: requires {min_bay}L, available {}L",
                    specs.engine_bay_size
                ),
            };
        }
    }

    if !rules.bolt_patterns.is_empty() && !rules.bolt_patterns.contains(&specs.bolt_pattern) {
        let accepted = join(rules.bolt_patterns.iter().map(|b| b.display_name()));
        return Compatibility::Incompatible {
            axis: CompatibilityAxis::BoltPattern,
            reason: format!(
                "bolt pattern mismatch: fits {accepted}, this vehicle uses {}",
                specs.bolt_pattern.display_name()
            ),
        };
    }

    if !rules.required_parts.is_empty() {
        let missing: Vec<&str> = rules
            .required_parts
            .iter()
            .filter(|id| vehicle.installed_part(id).is_none())
            .map(|id| id.as_str())
            .collect();
        if !missing.is_empty() {
            return Compatibility::Incompatible {
                axis: CompatibilityAxis::RequiredParts,
                reason: format!("required parts not installed: {}", missing.join(", ")),
            };
        }
    }

    if !rules.conflicting_parts.is_empty() {
        let conflicts: Vec<&str> = vehicle
            .installed_parts
            .iter()
            .filter(|ip| rules.conflicting_parts.contains(&ip.part.id))
            .map(|ip| ip.part.name.as_str())
            .collect();
        if !conflicts.is_empty() {
            return Compatibility::Incompatible {
                axis: CompatibilityAxis::ConflictingParts,
                reason: format!("conflicts with installed parts: {}", conflicts.join(", ")),
            };
        }
    }

    Compatibility::Compatible {
        warnings: collect_warnings(part, vehicle),
    }
}

/// All parts from an iterator that fit the vehicle.
pub fn filter_compatible<'a>(
    parts: impl IntoIterator<Item = &'a Part>,
    vehicle: &Vehicle,
) -> Vec<&'a Part> {
    parts
        .into_iter()
        .filter(|part| check_compatibility(part, vehicle).is_compatible())
        .collect()
}

/// Non-blocking advisories attached to a compatible verdict.
fn collect_warnings(part: &Part, vehicle: &Vehicle) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(max_weight) = part.compatibility.max_weight {
        let projected = vehicle.current_metrics.weight + part.weight;
        if projected > max_weight {
            warnings.push(format!(
                "projected total weight {projected:.0}kg exceeds the recommended limit of {max_weight:.0}kg"
            ));
        }
    }

    let has_category = |category: PartCategory| {
        vehicle
            .installed_parts
            .iter()
            .any(|ip| ip.part.category == category)
    };

    if part.category == PartCategory::Turbo && has_category(PartCategory::Supercharger) {
        warnings.push(
            "a supercharger is already installed; twin-charging is uncommon and hurts reliability"
                .to_string(),
        );
    }
    if part.category == PartCategory::Supercharger && has_category(PartCategory::Turbo) {
        warnings.push(
            "a turbocharger is already installed; twin-charging is uncommon and hurts reliability"
                .to_string(),
        );
    }

    let forced_induction =
        part.category == PartCategory::Turbo || part.category == PartCategory::Supercharger;
    if forced_induction && vehicle.base_specs.engine.naturally_aspirated {
        warnings.push(
            "this engine is naturally aspirated from the factory; forced induction needs supporting internals"
                .to_string(),
        );
    }

    warnings
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(" or ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        BaseSpecs, BoltPattern, CompatibilityRules, Drivetrain, EngineLayout, EngineSpec,
        MountType, Part, PartId, TransmissionSpec, TransmissionType, Vehicle,
    };
    use crate::garage::InstalledPart;

    fn test_vehicle() -> Vehicle {
        Vehicle::template(
            "test-car",
            "Testmake",
            "Testmodel",
            2004,
            BaseSpecs {
                engine: EngineSpec {
                    mount: MountType::Inline4,
                    displacement: 2.0,
                    cylinders: 4,
                    naturally_aspirated: true,
                    base_horsepower: 180.0,
                    base_torque: 210.0,
                    redline: 7200,
                },
                drivetrain: Drivetrain::Fwd,
                engine_layout: EngineLayout::Front,
                transmission: TransmissionSpec {
                    kind: TransmissionType::Manual,
                    gears: 6,
                },
                weight: 1200.0,
                wheelbase: 2600.0,
                track_width: 1500.0,
                engine_bay_size: 2.4,
                bolt_pattern: BoltPattern::FiveBy114_3,
                drag_coefficient: 0.32,
            },
        )
    }

    fn wildcard_part(category: PartCategory) -> Part {
        Part::new("universal", "Universal Part", "Testbrand", category, 500, 2.0)
    }

    #[test]
    fn wildcard_rules_accept_any_vehicle() {
        let part = wildcard_part(PartCategory::Gauges);
        let verdict = check_compatibility(&part, &test_vehicle());
        assert!(verdict.is_compatible());
    }

    #[test]
    fn mount_type_mismatch_rejects_and_names_axis() {
        let part = wildcard_part(PartCategory::Engine).with_compatibility(CompatibilityRules {
            mount_types: vec![MountType::V8, MountType::V10],
            ..CompatibilityRules::default()
        });

        match check_compatibility(&part, &test_vehicle()) {
            Compatibility::Incompatible { axis, reason } => {
                assert_eq!(axis, CompatibilityAxis::MountType);
                assert!(reason.contains("mount type"));
                assert!(reason.contains("V8 or V10"));
            }
            Compatibility::Compatible { .. } => panic!("expected rejection"),
        }
    }

    #[test]
    fn drivetrain_mismatch_rejects() {
        let part = wildcard_part(PartCategory::Differential).with_compatibility(
            CompatibilityRules {
                drivetrains: vec![Drivetrain::Rwd, Drivetrain::Awd],
                ..CompatibilityRules::default()
            },
        );

        match check_compatibility(&part, &test_vehicle()) {
            Compatibility::Incompatible { axis, reason } => {
                assert_eq!(axis, CompatibilityAxis::Drivetrain);
                assert!(reason.contains("RWD or AWD"));
                assert!(reason.contains("FWD"));
            }
            Compatibility::Compatible { .. } => panic!("expected rejection"),
        }
    }

    #[test]
    fn engine_layout_mismatch_rejects() {
        let part = wildcard_part(PartCategory::Intake).with_compatibility(CompatibilityRules {
            engine_layouts: vec![EngineLayout::Mid],
            ..CompatibilityRules::default()
        });

        match check_compatibility(&part, &test_vehicle()) {
            Compatibility::Incompatible { axis, .. } => {
                assert_eq!(axis, CompatibilityAxis::EngineLayout);
            }
            Compatibility::Compatible { .. } => panic!("expected rejection"),
        }
    }

    #[test]
    fn bay_size_below_minimum_rejects() {
        let part = wildcard_part(PartCategory::Engine).with_compatibility(CompatibilityRules {
            min_engine_bay_size: Some(3.0),
            ..CompatibilityRules::default()
        });

        match check_compatibility(&part, &test_vehicle()) {
            Compatibility::Incompatible { axis, reason } => {
                assert_eq!(axis, CompatibilityAxis::EngineBaySize);
                assert!(reason.contains("3L") || reason.contains("3.0"));
            }
            Compatibility::Compatible { .. } => panic!("expected rejection"),
        }
    }

    #[test]
    fn zero_bay_size_constraint_is_wildcard() {
        let part = wildcard_part(PartCategory::Engine).with_compatibility(CompatibilityRules {
            min_engine_bay_size: Some(0.0),
            ..CompatibilityRules::default()
        });
        assert!(check_compatibility(&part, &test_vehicle()).is_compatible());
    }

    #[test]
    fn bolt_pattern_mismatch_rejects() {
        let part = wildcard_part(PartCategory::Wheels).with_compatibility(CompatibilityRules {
            bolt_patterns: vec![BoltPattern::FiveBy120],
            ..CompatibilityRules::default()
        });

        match check_compatibility(&part, &test_vehicle()) {
            Compatibility::Incompatible { axis, reason } => {
                assert_eq!(axis, CompatibilityAxis::BoltPattern);
                assert!(reason.contains("5x120"));
                assert!(reason.contains("5x114.3"));
            }
            Compatibility::Compatible { .. } => panic!("expected rejection"),
        }
    }

    #[test]
    fn missing_required_part_rejects() {
        let part = wildcard_part(PartCategory::Turbo).with_compatibility(CompatibilityRules {
            required_parts: vec![PartId::new("oil-cooler")],
            ..CompatibilityRules::default()
        });

        match check_compatibility(&part, &test_vehicle()) {
            Compatibility::Incompatible { axis, reason } => {
                assert_eq!(axis, CompatibilityAxis::RequiredParts);
                assert!(reason.contains("oil-cooler"));
            }
            Compatibility::Compatible { .. } => panic!("expected rejection"),
        }
    }

    #[test]
    fn required_part_present_passes() {
        let mut vehicle = test_vehicle();
        vehicle.installed_parts.push(InstalledPart::new(wildcard_part(
            PartCategory::Cooling,
        )));
        let mut required = wildcard_part(PartCategory::Turbo);
        required.compatibility.required_parts = vec![PartId::new("universal")];

        assert!(check_compatibility(&required, &vehicle).is_compatible());
    }

    #[test]
    fn conflicting_part_rejects() {
        let mut vehicle = test_vehicle();
        let mut nitrous = wildcard_part(PartCategory::Nitrous);
        nitrous.name = "Wet Nitrous Kit".to_string();
        vehicle.installed_parts.push(InstalledPart::new(nitrous));

        let part = wildcard_part(PartCategory::Ecu).with_compatibility(CompatibilityRules {
            conflicting_parts: vec![PartId::new("universal")],
            ..CompatibilityRules::default()
        });

        match check_compatibility(&part, &vehicle) {
            Compatibility::Incompatible { axis, reason } => {
                assert_eq!(axis, CompatibilityAxis::ConflictingParts);
                assert!(reason.contains("Wet Nitrous Kit"));
            }
            Compatibility::Compatible { .. } => panic!("expected rejection"),
        }
    }

    #[test]
    fn first_failure_wins() {
        // Fails on both mount type and drivetrain; mount type is checked first.
        let part = wildcard_part(PartCategory::Engine).with_compatibility(CompatibilityRules {
            mount_types: vec![MountType::V8],
            drivetrains: vec![Drivetrain::Rwd],
            ..CompatibilityRules::default()
        });

        match check_compatibility(&part, &test_vehicle()) {
            Compatibility::Incompatible { axis, .. } => {
                assert_eq!(axis, CompatibilityAxis::MountType);
            }
            Compatibility::Compatible { .. } => panic!("expected rejection"),
        }
    }

    #[test]
    fn forced_induction_on_na_engine_warns_but_passes() {
        let part = wildcard_part(PartCategory::Turbo);

        match check_compatibility(&part, &test_vehicle()) {
            Compatibility::Compatible { warnings } => {
                assert!(warnings.iter().any(|w| w.contains("naturally aspirated")));
            }
            Compatibility::Incompatible { .. } => panic!("warnings must not block"),
        }
    }

    #[test]
    fn twin_charging_warns() {
        let mut vehicle = test_vehicle();
        vehicle.base_specs.engine.naturally_aspirated = false;
        vehicle
            .installed_parts
            .push(InstalledPart::new(wildcard_part(PartCategory::Supercharger)));

        match check_compatibility(&wildcard_part(PartCategory::Turbo), &vehicle) {
            Compatibility::Compatible { warnings } => {
                assert!(warnings.iter().any(|w| w.contains("supercharger")));
            }
            Compatibility::Incompatible { .. } => panic!("warnings must not block"),
        }
    }

    #[test]
    fn max_weight_advisory_warns() {
        let mut part = wildcard_part(PartCategory::Bodykit);
        part.weight = 40.0;
        part.compatibility.max_weight = Some(1220.0);

        match check_compatibility(&part, &test_vehicle()) {
            Compatibility::Compatible { warnings } => {
                assert!(warnings.iter().any(|w| w.contains("weight")));
            }
            Compatibility::Incompatible { .. } => panic!("advisory must not block"),
        }
    }

    #[test]
    fn filter_compatible_keeps_only_fitting_parts() {
        let fits = wildcard_part(PartCategory::Gauges);
        let mut rejected = wildcard_part(PartCategory::Engine);
        rejected.id = PartId::new("v8-swap");
        rejected.compatibility.mount_types = vec![MountType::V8];

        let vehicle = test_vehicle();
        let parts = [fits.clone(), rejected];
        let compatible = filter_compatible(parts.iter(), &vehicle);

        assert_eq!(compatible.len(), 1);
        assert_eq!(compatible[0].id, fits.id);
    }
}
