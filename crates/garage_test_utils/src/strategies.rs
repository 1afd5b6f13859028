//! Property-based testing strategies.
//!
//! Ranges are bounded to realistic catalog values so generated inputs stay
//! clear of the aggregator's defensive clamps (weight floor, drag floor).

use garage_core::catalog::{
    BaseSpecs, BoltPattern, Drivetrain, EngineLayout, EngineSpec, MountType, Part, PartCategory,
    PartStats, TransmissionSpec, TransmissionType, Vehicle,
};
use proptest::prelude::*;

/// Any part category.
pub fn arb_category() -> impl Strategy<Value = PartCategory> {
    prop::sample::select(PartCategory::ALL.to_vec())
}

/// Any drivetrain.
pub fn arb_drivetrain() -> impl Strategy<Value = Drivetrain> {
    prop::sample::select(vec![
        Drivetrain::Fwd,
        Drivetrain::Rwd,
        Drivetrain::Awd,
        Drivetrain::FourWd,
    ])
}

/// Any engine layout.
pub fn arb_engine_layout() -> impl Strategy<Value = EngineLayout> {
    prop::sample::select(vec![EngineLayout::Front, EngineLayout::Mid, EngineLayout::Rear])
}

/// Any engine mount family.
pub fn arb_mount_type() -> impl Strategy<Value = MountType> {
    prop::sample::select(vec![
        MountType::Inline4,
        MountType::Inline6,
        MountType::V6,
        MountType::V8,
        MountType::V10,
        MountType::V12,
        MountType::Flat4,
        MountType::Flat6,
        MountType::Rotary,
        MountType::Electric,
    ])
}

/// Sparse stats with every field optionally present, in catalog-realistic
/// ranges.
pub fn arb_stats() -> impl Strategy<Value = PartStats> {
    (
        prop::option::of(0.0..200.0f64),
        prop::option::of(0.9..1.4f64),
        prop::option::of(0.0..200.0f64),
        prop::option::of(0.9..1.3f64),
        prop::option::of(-50.0..60.0f64),
        prop::option::of(0.0..120.0f64),
        prop::option::of(0.0..8.0f64),
        prop::option::of(0.9..1.5f64),
        prop::option::of(0.9..1.25f64),
        prop::option::of(0.4..2.0f64),
    )
        .prop_map(
            |(hp_add, hp_mult, tq_add, tq_mult, weight_red, downforce, drag_red, braking, grip, boost)| {
                PartStats {
                    horsepower_add: hp_add,
                    horsepower_multiplier: hp_mult,
                    torque_add: tq_add,
                    torque_multiplier: tq_mult,
                    weight_reduction: weight_red,
                    downforce_add: downforce,
                    drag_reduction: drag_red,
                    braking_power: braking,
                    tire_grip: grip,
                    rev_limit: None,
                    boost_pressure: boost,
                }
            },
        )
}

/// Stats that can only improve straight-line performance: non-negative
/// power adders, multipliers of at least one, non-negative weight
/// reduction.
pub fn arb_upgrade_stats() -> impl Strategy<Value = PartStats> {
    (0.0..150.0f64, 1.0..1.3f64, 0.0..40.0f64).prop_map(|(hp_add, hp_mult, weight_red)| {
        PartStats {
            horsepower_add: Some(hp_add),
            horsepower_multiplier: Some(hp_mult),
            weight_reduction: Some(weight_red),
            ..PartStats::default()
        }
    })
}

/// A wildcard-compatible part with arbitrary category, price and stats.
pub fn arb_part() -> impl Strategy<Value = Part> {
    (0u32..1000, arb_category(), 0i64..20_000, arb_stats()).prop_map(
        |(id, category, price, stats)| {
            Part::new(
                format!("part-{id}"),
                format!("Part {id}"),
                "Propbrand",
                category,
                price,
                1.0,
            )
            .with_stats(stats)
        },
    )
}

/// A wildcard-compatible part whose stats can only improve performance.
pub fn arb_upgrade_part() -> impl Strategy<Value = Part> {
    (0u32..1000, arb_category(), 0i64..20_000, arb_upgrade_stats()).prop_map(
        |(id, category, price, stats)| {
            Part::new(
                format!("part-{id}"),
                format!("Part {id}"),
                "Propbrand",
                category,
                price,
                1.0,
            )
            .with_stats(stats)
        },
    )
}

/// A vehicle template with bounded, realistic base specs.
pub fn arb_vehicle() -> impl Strategy<Value = Vehicle> {
    (
        0u32..1000,
        80.0..600.0f64,
        100.0..700.0f64,
        800.0..2500.0f64,
        arb_drivetrain(),
        arb_engine_layout(),
        arb_mount_type(),
        1.5..5.0f64,
        0.25..0.45f64,
    )
        .prop_map(
            |(id, hp, torque, weight, drivetrain, layout, mount, bay, drag)| {
                Vehicle::template(
                    format!("vehicle-{id}"),
                    "Propmake",
                    format!("Model {id}"),
                    2004,
                    BaseSpecs {
                        engine: EngineSpec {
                            mount,
                            displacement: 2.0,
                            cylinders: 6,
                            naturally_aspirated: true,
                            base_horsepower: hp,
                            base_torque: torque,
                            redline: 7500,
                        },
                        drivetrain,
                        engine_layout: layout,
                        transmission: TransmissionSpec {
                            kind: TransmissionType::Manual,
                            gears: 6,
                        },
                        weight,
                        wheelbase: 2600.0,
                        track_width: 1500.0,
                        engine_bay_size: bay,
                        bolt_pattern: BoltPattern::FiveBy114_3,
                        drag_coefficient: drag,
                    },
                )
            },
        )
}
