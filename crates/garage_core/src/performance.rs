//! Performance aggregator.
//!
//! Folds the stat modifiers of every installed part into a single
//! [`PerformanceMetrics`] profile. The fold is pure and deterministic: the
//! result is a function of the base specs and the installed *set* - parts
//! are folded in sorted part-id order, so neither install order nor call
//! history can change the outcome.
//!
//! # Algorithm
//!
//! Two passes over the installed parts:
//!
//! 1. **Additive pass** - flat adders are summed onto the base values. A
//!    flat power adder (a turbo swap) establishes a new baseline.
//! 2. **Multiplicative pass** - multiplier products scale the *additive
//!    subtotal*, not the raw base values. A percentage tune therefore
//!    scales whatever baseline the flat adders produced.
//!
//! # Kinematics
//!
//! The derived figures use a power-to-weight model calibrated for
//! plausibility, not physical exactness. The contract is monotonicity:
//! more power or less weight strictly shortens `zero_to_hundred` and never
//! lowers `top_speed`; drag reduction never slows the car; downforce never
//! improves a straight-line figure. The power-limited and traction-limited
//! forces are composed harmonically: a `min()` of the two would plateau
//! and break strict monotonicity in power.

use serde::{Deserialize, Serialize};

use crate::catalog::Vehicle;

/// Floor for aggregated vehicle mass (kg). Stacked weight-reduction parts
/// can never drive the mass to zero or below.
pub const MIN_VEHICLE_WEIGHT: f64 = 250.0;

/// Floor for the effective drag coefficient.
pub const MIN_DRAG_COEFFICIENT: f64 = 0.05;

/// Horsepower gained per bar of boost above a part's rated pressure.
pub const BOOST_HP_PER_BAR: f64 = 15.0;

const AIR_DENSITY: f64 = 1.225; // kg/m^3 at sea level
const GRAVITY: f64 = 9.81; // m/s^2
const FRONTAL_AREA: f64 = 2.0; // m^2, single calibration value for all bodies
const WATTS_PER_HP: f64 = 745.7;
const LBS_PER_KG: f64 = 2.205;
const KMH_TO_MS: f64 = 1.0 / 3.6;
const LAUNCH_PENALTY_S: f64 = 0.3;
const TRACTION_UTILIZATION: f64 = 0.8;
const BASE_FRICTION: f64 = 0.9; // dry asphalt
const BASE_LATERAL_G: f64 = 0.85;
const LATERAL_G_CAP: f64 = 2.5;

/// Derived performance profile of a vehicle with its installed parts.
///
/// A pure projection of `(base_specs, installed_parts)`: recomputed
/// wholesale by [`calculate_performance`], never patched incrementally.
/// Ratios derivable from the stored fields are methods, not fields.
///
/// Values are unrounded; presentation rounding belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Crank horsepower after both passes.
    pub horsepower: f64,
    /// Crank torque (Nm) after both passes.
    pub torque: f64,
    /// Vehicle mass (kg), clamped to [`MIN_VEHICLE_WEIGHT`].
    pub weight: f64,
    /// 0-60 mph (0-96.56 km/h) time in seconds.
    pub zero_to_sixty: f64,
    /// 0-100 km/h time in seconds.
    pub zero_to_hundred: f64,
    /// Quarter-mile time in seconds.
    pub quarter_mile: f64,
    /// Drag-limited top speed in km/h.
    pub top_speed: f64,
    /// 100-0 km/h braking distance in meters.
    pub braking_distance: f64,
    /// Peak cornering acceleration in g.
    pub lateral_g: f64,
    /// Aggregate downforce (kg at reference speed). Consumed by cornering
    /// models downstream; never feeds the straight-line figures.
    pub downforce: f64,
    /// Effective drag coefficient after aero parts.
    pub drag_coefficient: f64,
    /// Braking force coefficient (product of part multipliers).
    pub braking_power: f64,
    /// Tire grip coefficient (product of part multipliers).
    pub tire_grip: f64,
    /// Estimated fuel consumption in L/100km.
    pub fuel_consumption: f64,
}

impl PerformanceMetrics {
    /// Power-to-weight ratio in horsepower per metric ton.
    #[must_use]
    pub fn power_to_weight(&self) -> f64 {
        if self.weight <= 0.0 {
            return 0.0;
        }
        self.horsepower / self.weight * 1000.0
    }

    /// Composite efficiency score clamped to 0-100.
    ///
    /// Rewards power per liter of fuel burned and low mass.
    #[must_use]
    pub fn efficiency_score(&self) -> f64 {
        if self.fuel_consumption <= 0.0 || self.weight <= 0.0 {
            return 0.0;
        }
        let power_efficiency = self.horsepower / self.fuel_consumption;
        let weight_efficiency = 1500.0 / self.weight;
        let score = (power_efficiency * 3.0 + weight_efficiency * 50.0) / 2.0;
        score.clamp(0.0, 100.0)
    }
}

/// Calculate all performance metrics for a vehicle with its installed parts.
///
/// Pure and deterministic: the same installed set and base specs always
/// yield the same metrics, independent of call order or install history.
/// Neither argument is mutated; the caller decides where the result lives.
#[must_use]
pub fn calculate_performance(vehicle: &Vehicle) -> PerformanceMetrics {
    let specs = &vehicle.base_specs;

    // Pin fold order to sorted part ids so the metrics are a function of
    // the installed set, not of the sequence that produced it.
    let mut parts: Vec<_> = vehicle.installed_parts.iter().collect();
    parts.sort_by(|a, b| a.part.id.cmp(&b.part.id));

    // Additive pass.
    let mut horsepower = specs.engine.base_horsepower;
    let mut torque = specs.engine.base_torque;
    let mut weight = specs.weight;
    let mut downforce = 0.0;
    let mut drag_reduction_pct = 0.0;

    for installed in &parts {
        let stats = &installed.part.stats;

        horsepower += stats.horsepower_add.unwrap_or(0.0);
        torque += stats.torque_add.unwrap_or(0.0);
        // Positive reduction lightens the car; negative models added mass.
        weight -= stats.weight_reduction.unwrap_or(0.0);
        downforce += stats.downforce_add.unwrap_or(0.0);
        drag_reduction_pct += stats.drag_reduction.unwrap_or(0.0);

        // Boost tuned above the rated pressure adds power like any other
        // flat adder, so multipliers scale it too.
        if let Some(rated) = stats.boost_pressure {
            if let Some(target) = installed.tuning.as_ref().and_then(|t| t.boost_target) {
                horsepower += (target - rated) * BOOST_HP_PER_BAR;
            }
        }
    }

    weight = weight.max(MIN_VEHICLE_WEIGHT);

    // Multiplicative pass, applied to the additive subtotals.
    let mut horsepower_factor = 1.0;
    let mut torque_factor = 1.0;
    let mut braking_power = 1.0;
    let mut tire_grip = 1.0;

    for installed in &parts {
        let stats = &installed.part.stats;
        horsepower_factor *= stats.horsepower_multiplier.unwrap_or(1.0);
        torque_factor *= stats.torque_multiplier.unwrap_or(1.0);
        braking_power *= stats.braking_power.unwrap_or(1.0);
        tire_grip *= stats.tire_grip.unwrap_or(1.0);
    }

    horsepower *= horsepower_factor;
    torque *= torque_factor;

    let drag_coefficient =
        (specs.drag_coefficient * (1.0 - drag_reduction_pct / 100.0)).max(MIN_DRAG_COEFFICIENT);

    let wheel_horsepower = horsepower * (1.0 - specs.drivetrain.power_loss());

    PerformanceMetrics {
        horsepower,
        torque,
        weight,
        zero_to_sixty: acceleration_time(wheel_horsepower, weight, 0.0, 96.56, tire_grip),
        zero_to_hundred: acceleration_time(wheel_horsepower, weight, 0.0, 100.0, tire_grip),
        quarter_mile: quarter_mile_time(wheel_horsepower, weight),
        top_speed: top_speed_kmh(wheel_horsepower, drag_coefficient),
        braking_distance: braking_distance_m(100.0, braking_power, tire_grip),
        lateral_g: lateral_g(tire_grip, downforce, weight),
        downforce,
        drag_coefficient,
        braking_power,
        tire_grip,
        fuel_consumption: fuel_consumption(horsepower, weight, specs.engine.displacement),
    }
}

/// Time to accelerate from `v1` to `v2` (km/h).
///
/// The available force is the harmonic composition of the power-limited
/// force `P / v_avg` and the traction-limited force `m * g * grip * u`. The
/// mass term cancels out of the traction component, leaving
/// `t = dv * (m * v_avg / P + 1 / (g * grip * u))`, which is strictly
/// decreasing in power and strictly increasing in mass.
fn acceleration_time(wheel_hp: f64, mass_kg: f64, v1_kmh: f64, v2_kmh: f64, grip: f64) -> f64 {
    let power_watts = (wheel_hp * WATTS_PER_HP).max(1.0);
    let avg_velocity = ((v1_kmh + v2_kmh) / 2.0) * KMH_TO_MS;
    let delta_v = (v2_kmh - v1_kmh) * KMH_TO_MS;

    let power_term = mass_kg * avg_velocity / power_watts;
    let traction_term = 1.0 / (GRAVITY * grip * TRACTION_UTILIZATION);
    let launch = if v1_kmh == 0.0 { LAUNCH_PENALTY_S } else { 0.0 };

    launch + delta_v * (power_term + traction_term)
}

/// Quarter-mile elapsed time via the Hale formula `5.825 * (W/P)^(1/3)`.
fn quarter_mile_time(wheel_hp: f64, mass_kg: f64) -> f64 {
    let weight_lbs = mass_kg * LBS_PER_KG;
    5.825 * (weight_lbs / wheel_hp.max(1.0)).cbrt()
}

/// Drag-limited top speed: `v = (2P / (rho * Cd * A))^(1/3)`.
fn top_speed_kmh(wheel_hp: f64, drag_coefficient: f64) -> f64 {
    let power_watts = (wheel_hp * WATTS_PER_HP).max(1.0);
    let v_cubed = 2.0 * power_watts / (AIR_DENSITY * drag_coefficient * FRONTAL_AREA);
    v_cubed.cbrt() / KMH_TO_MS
}

/// Braking distance to a stop from `speed_kmh`: `d = v^2 / (2a)`.
fn braking_distance_m(speed_kmh: f64, braking_power: f64, grip: f64) -> f64 {
    let speed_ms = speed_kmh * KMH_TO_MS;
    let deceleration = BASE_FRICTION * grip * GRAVITY * braking_power;
    speed_ms * speed_ms / (2.0 * deceleration)
}

/// Peak cornering load from mechanical grip plus a downforce contribution.
fn lateral_g(grip: f64, downforce: f64, weight: f64) -> f64 {
    let base = BASE_LATERAL_G * grip;
    let aero = (downforce / weight) * 0.1;
    (base + aero).min(LATERAL_G_CAP)
}

/// Estimated fuel consumption (L/100km) from displacement, power and mass.
fn fuel_consumption(horsepower: f64, weight: f64, displacement: f64) -> f64 {
    let base = displacement * 2.5;
    let power_factor = 1.0 + (horsepower - 150.0) * 0.002;
    let weight_factor = 1.0 + (weight - 1500.0) * 0.0002;
    (base * power_factor * weight_factor).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        BaseSpecs, BoltPattern, Drivetrain, EngineLayout, EngineSpec, MountType, Part,
        PartCategory, PartStats, TransmissionSpec, TransmissionType, Vehicle,
    };
    use crate::garage::{InstalledPart, TuningSettings};

    fn base_vehicle() -> Vehicle {
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

    fn part_with_stats(id: &str, category: PartCategory, stats: PartStats) -> InstalledPart {
        InstalledPart::new(
            Part::new(id, id.to_uppercase(), "Testbrand", category, 1000, 5.0).with_stats(stats),
        )
    }

    fn turbo_kit() -> InstalledPart {
        part_with_stats(
            "turbo-kit",
            PartCategory::Turbo,
            PartStats {
                horsepower_add: Some(120.0),
                torque_add: Some(150.0),
                ..PartStats::default()
            },
        )
    }

    fn ecu_tune() -> InstalledPart {
        part_with_stats(
            "ecu-tune",
            PartCategory::Ecu,
            PartStats {
                horsepower_multiplier: Some(1.15),
                ..PartStats::default()
            },
        )
    }

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn base_vehicle_uses_base_specs() {
        let metrics = calculate_performance(&base_vehicle());
        assert_eq!(metrics.horsepower, 276.0);
        assert_eq!(metrics.torque, 392.0);
        assert_eq!(metrics.weight, 1560.0);
        assert_eq!(metrics.drag_coefficient, 0.34);
    }

    #[test]
    fn additive_pass_sums_flat_adders() {
        let mut vehicle = base_vehicle();
        vehicle.installed_parts.push(turbo_kit());

        let metrics = calculate_performance(&vehicle);
        approx(metrics.horsepower, 396.0);
        approx(metrics.torque, 542.0);
    }

    #[test]
    fn multiplier_scales_additive_subtotal() {
        let mut vehicle = base_vehicle();
        vehicle.installed_parts.push(turbo_kit());
        vehicle.installed_parts.push(ecu_tune());

        let metrics = calculate_performance(&vehicle);
        // 276 + 120 = 396, then * 1.15
        approx(metrics.horsepower, 396.0 * 1.15);
        // No torque multiplier on the tune.
        approx(metrics.torque, 542.0);
    }

    #[test]
    fn multiplier_reapplies_to_remaining_subtotal() {
        let mut vehicle = base_vehicle();
        vehicle.installed_parts.push(ecu_tune());

        // With the turbo gone, the multiplier scales the bare base value.
        let metrics = calculate_performance(&vehicle);
        approx(metrics.horsepower, 276.0 * 1.15);
    }

    #[test]
    fn weight_reduction_lightens_and_negative_adds_mass() {
        let mut vehicle = base_vehicle();
        vehicle.installed_parts.push(part_with_stats(
            "carbon-hood",
            PartCategory::Bodykit,
            PartStats {
                weight_reduction: Some(12.0),
                ..PartStats::default()
            },
        ));
        vehicle.installed_parts.push(part_with_stats(
            "roll-cage",
            PartCategory::Safety,
            PartStats {
                weight_reduction: Some(-35.0),
                ..PartStats::default()
            },
        ));

        let metrics = calculate_performance(&vehicle);
        approx(metrics.weight, 1560.0 - 12.0 + 35.0);
    }

    #[test]
    fn weight_clamps_to_positive_floor() {
        let mut vehicle = base_vehicle();
        vehicle.installed_parts.push(part_with_stats(
            "impossible-diet",
            PartCategory::Chassis,
            PartStats {
                weight_reduction: Some(5000.0),
                ..PartStats::default()
            },
        ));

        let metrics = calculate_performance(&vehicle);
        assert_eq!(metrics.weight, MIN_VEHICLE_WEIGHT);
    }

    #[test]
    fn drag_reduction_accumulates_percentage_points() {
        let mut vehicle = base_vehicle();
        for (id, pct) in [("splitter", 3.0), ("diffuser", 2.0)] {
            vehicle.installed_parts.push(part_with_stats(
                id,
                PartCategory::Aero,
                PartStats {
                    drag_reduction: Some(pct),
                    ..PartStats::default()
                },
            ));
        }

        let metrics = calculate_performance(&vehicle);
        approx(metrics.drag_coefficient, 0.34 * (1.0 - 5.0 / 100.0));
    }

    #[test]
    fn drag_coefficient_clamps_to_floor() {
        let mut vehicle = base_vehicle();
        vehicle.installed_parts.push(part_with_stats(
            "magic-aero",
            PartCategory::Aero,
            PartStats {
                drag_reduction: Some(120.0),
                ..PartStats::default()
            },
        ));

        let metrics = calculate_performance(&vehicle);
        assert_eq!(metrics.drag_coefficient, MIN_DRAG_COEFFICIENT);
    }

    #[test]
    fn more_power_is_strictly_faster() {
        let plain = calculate_performance(&base_vehicle());

        let mut tuned = base_vehicle();
        tuned.installed_parts.push(turbo_kit());
        let boosted = calculate_performance(&tuned);

        assert!(boosted.zero_to_hundred < plain.zero_to_hundred);
        assert!(boosted.zero_to_sixty < plain.zero_to_sixty);
        assert!(boosted.quarter_mile < plain.quarter_mile);
        assert!(boosted.top_speed > plain.top_speed);
    }

    #[test]
    fn less_weight_is_strictly_faster() {
        let plain = calculate_performance(&base_vehicle());

        let mut lightened = base_vehicle();
        lightened.installed_parts.push(part_with_stats(
            "carbon-hood",
            PartCategory::Bodykit,
            PartStats {
                weight_reduction: Some(40.0),
                ..PartStats::default()
            },
        ));
        let light = calculate_performance(&lightened);

        assert!(light.zero_to_hundred < plain.zero_to_hundred);
        assert!(light.top_speed >= plain.top_speed);
    }

    #[test]
    fn drag_reduction_never_slows_the_car() {
        let plain = calculate_performance(&base_vehicle());

        let mut slick = base_vehicle();
        slick.installed_parts.push(part_with_stats(
            "flat-floor",
            PartCategory::Aero,
            PartStats {
                drag_reduction: Some(6.0),
                ..PartStats::default()
            },
        ));
        let sleek = calculate_performance(&slick);

        assert!(sleek.top_speed > plain.top_speed);
        assert!(sleek.zero_to_hundred <= plain.zero_to_hundred);
    }

    #[test]
    fn downforce_never_improves_straight_line_figures() {
        let plain = calculate_performance(&base_vehicle());

        let mut winged = base_vehicle();
        winged.installed_parts.push(part_with_stats(
            "gt-wing",
            PartCategory::Aero,
            PartStats {
                downforce_add: Some(80.0),
                ..PartStats::default()
            },
        ));
        let wing = calculate_performance(&winged);

        assert_eq!(wing.top_speed, plain.top_speed);
        assert_eq!(wing.zero_to_hundred, plain.zero_to_hundred);
        assert!(wing.lateral_g > plain.lateral_g);
        assert_eq!(wing.downforce, 80.0);
    }

    #[test]
    fn braking_and_grip_multipliers_fold_into_coefficients() {
        let mut vehicle = base_vehicle();
        vehicle.installed_parts.push(part_with_stats(
            "big-brakes",
            PartCategory::Brakes,
            PartStats {
                braking_power: Some(1.3),
                ..PartStats::default()
            },
        ));
        vehicle.installed_parts.push(part_with_stats(
            "semi-slicks",
            PartCategory::Tires,
            PartStats {
                tire_grip: Some(1.1),
                ..PartStats::default()
            },
        ));

        let plain = calculate_performance(&base_vehicle());
        let metrics = calculate_performance(&vehicle);

        approx(metrics.braking_power, 1.3);
        approx(metrics.tire_grip, 1.1);
        assert!(metrics.braking_distance < plain.braking_distance);
        assert!(metrics.lateral_g > plain.lateral_g);
    }

    #[test]
    fn boost_target_above_rated_pressure_adds_power() {
        let mut vehicle = base_vehicle();
        let mut turbo = turbo_kit();
        turbo.part.stats.boost_pressure = Some(1.0);
        turbo.tuning = Some(TuningSettings {
            boost_target: Some(1.4),
        });
        vehicle.installed_parts.push(turbo);

        let metrics = calculate_performance(&vehicle);
        approx(metrics.horsepower, 396.0 + 0.4 * BOOST_HP_PER_BAR);
    }

    #[test]
    fn metrics_are_deterministic() {
        let mut vehicle = base_vehicle();
        vehicle.installed_parts.push(turbo_kit());
        vehicle.installed_parts.push(ecu_tune());

        let first = calculate_performance(&vehicle);
        let second = calculate_performance(&vehicle);
        assert_eq!(first, second);
    }

    #[test]
    fn metrics_ignore_install_order() {
        let mut forward = base_vehicle();
        forward.installed_parts.push(turbo_kit());
        forward.installed_parts.push(ecu_tune());

        let mut reversed = base_vehicle();
        reversed.installed_parts.push(ecu_tune());
        reversed.installed_parts.push(turbo_kit());

        assert_eq!(
            calculate_performance(&forward),
            calculate_performance(&reversed)
        );
    }

    #[test]
    fn power_to_weight_is_derived_on_demand() {
        let metrics = calculate_performance(&base_vehicle());
        approx(metrics.power_to_weight(), 276.0 / 1560.0 * 1000.0);
    }

    #[test]
    fn efficiency_score_stays_in_range() {
        let metrics = calculate_performance(&base_vehicle());
        let score = metrics.efficiency_score();
        assert!((0.0..=100.0).contains(&score));
    }
}
