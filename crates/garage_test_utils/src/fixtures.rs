//! Test fixtures and helpers.
//!
//! Pre-built vehicles and parts for consistent testing across crates.

use garage_core::catalog::{
    BaseSpecs, BoltPattern, CompatibilityRules, Drivetrain, EngineLayout, EngineSpec, MountType,
    Part, PartCategory, PartStats, TransmissionSpec, TransmissionType, Vehicle,
};

/// The reference test vehicle: 276 hp / 392 Nm / 1560 kg AWD coupe.
#[must_use]
pub fn skyline() -> Vehicle {
    Vehicle::template(
        "skyline-r34",
        "Nissan",
        "Skyline GT-R",
        1999,
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
        },
    )
}

/// A light FWD hatchback with a small NA engine.
#[must_use]
pub fn hatchback() -> Vehicle {
    Vehicle::template(
        "civic-ek9",
        "Honda",
        "Civic Type R",
        1997,
        BaseSpecs {
            engine: EngineSpec {
                mount: MountType::Inline4,
                displacement: 1.6,
                cylinders: 4,
                naturally_aspirated: true,
                base_horsepower: 182.0,
                base_torque: 160.0,
                redline: 8400,
            },
            drivetrain: Drivetrain::Fwd,
            engine_layout: EngineLayout::Front,
            transmission: TransmissionSpec {
                kind: TransmissionType::Manual,
                gears: 5,
            },
            weight: 1070.0,
            wheelbase: 2620.0,
            track_width: 1475.0,
            engine_bay_size: 2.0,
            bolt_pattern: BoltPattern::FiveBy114_3,
            drag_coefficient: 0.33,
        },
    )
}

/// Turbo kit: +120 hp, +150 Nm, rated at 1.2 bar.
///
/// Fits inline-6 and V6 mounts with at least 2.5L of bay volume, so it
/// installs on [`skyline`] but not [`hatchback`].
#[must_use]
pub fn turbo_kit() -> Part {
    Part::new("turbo-kit", "Stage 2 Turbo Kit", "Boostwerks", PartCategory::Turbo, 8500, 18.0)
        .with_compatibility(CompatibilityRules {
            mount_types: vec![MountType::Inline6, MountType::V6],
            min_engine_bay_size: Some(2.5),
            ..CompatibilityRules::default()
        })
        .with_stats(PartStats {
            horsepower_add: Some(120.0),
            torque_add: Some(150.0),
            boost_pressure: Some(1.2),
            ..PartStats::default()
        })
        .with_description("Twin-scroll turbocharger with intercooler piping.")
}

/// ECU tune: x1.15 horsepower multiplier.
#[must_use]
pub fn ecu_tune() -> Part {
    Part::new("ecu-tune", "Performance ECU Tune", "Apexsoft", PartCategory::Ecu, 1200, 0.5)
        .with_stats(PartStats {
            horsepower_multiplier: Some(1.15),
            ..PartStats::default()
        })
        .with_description("Remapped ignition and fuel tables.")
}

/// Carbon hood: -12 kg.
#[must_use]
pub fn carbon_hood() -> Part {
    Part::new("carbon-hood", "Carbon Fiber Hood", "Featherlite", PartCategory::Bodykit, 2200, 4.0)
        .with_stats(PartStats {
            weight_reduction: Some(12.0),
            ..PartStats::default()
        })
}

/// Semi-slick tires: x1.1 grip.
#[must_use]
pub fn semi_slicks() -> Part {
    Part::new("semi-slicks", "Semi-Slick Tires", "Gripmax", PartCategory::Tires, 1800, 0.0)
        .with_stats(PartStats {
            tire_grip: Some(1.1),
            ..PartStats::default()
        })
}

/// A cheap part with wildcard compatibility and identity stats.
#[must_use]
pub fn universal_part(id: &str, category: PartCategory, price: i64) -> Part {
    Part::new(id, format!("Universal {}", category.display_name()), "Genparts", category, price, 1.0)
}
