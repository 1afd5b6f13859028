//! Configuration session: the mutable "current vehicle + installed parts"
//! state and its transactions.
//!
//! [`GarageSession`] is an explicit, constructor-injected service object -
//! callers own it and pass it around; there is no global store. Every
//! mutating operation is synchronous and all-or-nothing: it runs the
//! compatibility resolver, moves money through the ledger, mutates the
//! installed set, and ends with an explicit [`GarageSession::recalculate`]
//! before returning. There is no implicit recomputation trigger.
//!
//! If used from multiple threads, wrap the session in a mutex: each
//! operation is a critical section so metrics always match the installed
//! set at the moment they are read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::builds::{BuildList, GarageSnapshot, InstalledPartSnapshot, SavedBuild};
use crate::catalog::{Part, PartId, PartRegistry, SlotPolicy, Vehicle, VehicleRegistry};
use crate::compat::{check_compatibility, Compatibility};
use crate::economy::Ledger;
use crate::error::{GarageError, Result};
use crate::livery::Livery;
use crate::performance::{calculate_performance, PerformanceMetrics};

/// A part attached to the current vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstalledPart {
    /// The catalog part. Owned copy - catalog entries are never mutated.
    pub part: Part,
    /// When the part was installed.
    pub installed_at: DateTime<Utc>,
    /// Optional tuning overrides for this part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuning: Option<TuningSettings>,
}

impl InstalledPart {
    /// Install a part now, with no tuning overrides.
    #[must_use]
    pub fn new(part: Part) -> Self {
        Self {
            part,
            installed_at: Utc::now(),
            tuning: None,
        }
    }
}

/// Per-part tuning overrides.
///
/// Only fields with a performance model live here; unset fields leave the
/// part at its catalog behavior.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TuningSettings {
    /// Boost pressure target (bar) for forced-induction parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost_target: Option<f64>,
}

impl TuningSettings {
    /// Overlay another settings value onto this one; set fields win.
    pub fn merge(&mut self, other: TuningSettings) {
        if other.boost_target.is_some() {
            self.boost_target = other.boost_target;
        }
    }
}

/// Successful result of an install transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The part was installed into a free slot.
    Installed,
    /// The part replaced a same-category occupant, whose price was refunded.
    Replaced {
        /// Id of the part that was removed.
        removed: PartId,
    },
    /// The exact part was already installed. No money moved, nothing
    /// recomputed; informational, not an error.
    AlreadyInstalled,
}

/// Owns the current vehicle, the ledger, saved builds and livery state, and
/// orchestrates them into atomic install/uninstall transactions.
#[derive(Debug, Clone)]
pub struct GarageSession {
    vehicle: Option<Vehicle>,
    ledger: Ledger,
    builds: BuildList,
    livery: Livery,
}

impl Default for GarageSession {
    fn default() -> Self {
        Self::new(Ledger::default())
    }
}

impl GarageSession {
    /// Create a session with no vehicle selected.
    #[must_use]
    pub fn new(ledger: Ledger) -> Self {
        Self {
            vehicle: None,
            ledger,
            builds: BuildList::new(),
            livery: Livery::default(),
        }
    }

    /// The current working-copy vehicle, if one is selected.
    #[must_use]
    pub fn current_vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    /// Cached metrics of the current vehicle.
    #[must_use]
    pub fn metrics(&self) -> Option<&PerformanceMetrics> {
        self.vehicle.as_ref().map(|v| &v.current_metrics)
    }

    /// The session ledger.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Current balance.
    #[must_use]
    pub fn balance(&self) -> i64 {
        self.ledger.balance()
    }

    /// Credit the ledger (race winnings, sell-offs, daily bonuses).
    pub fn credit(&mut self, amount: i64) {
        self.ledger.add(amount);
    }

    /// Debit the ledger outside an install transaction (vehicle purchases).
    ///
    /// Returns true if the transaction succeeded.
    pub fn try_spend(&mut self, amount: i64) -> bool {
        self.ledger.spend(amount)
    }

    /// Current livery state.
    #[must_use]
    pub fn livery(&self) -> &Livery {
        &self.livery
    }

    /// Mutable livery state. Cosmetic only; no recompute is needed.
    pub fn livery_mut(&mut self) -> &mut Livery {
        &mut self.livery
    }

    /// Saved builds, most recently saved first.
    #[must_use]
    pub fn saved_builds(&self) -> &[SavedBuild] {
        self.builds.as_slice()
    }

    /// Replace the current vehicle with a fresh working copy of a template.
    ///
    /// Destroys the previous working copy: installed parts, tuning
    /// overrides and livery customization all reset to defaults.
    pub fn select_vehicle(&mut self, template: Vehicle) {
        let mut vehicle = template;
        vehicle.installed_parts.clear();
        self.livery = Livery::default();
        tracing::info!(vehicle = %vehicle.id, "Vehicle selected");
        self.vehicle = Some(vehicle);
        self.recalculate();
    }

    /// Install a part as one atomic transaction.
    ///
    /// Either the part ends up installed (replacing any same-category
    /// occupant, with exactly one net ledger movement) or the session is
    /// left untouched. See [`InstallOutcome`] for the success cases.
    ///
    /// # Errors
    ///
    /// - [`GarageError::VehicleNotSelected`] - no current vehicle.
    /// - [`GarageError::IncompatiblePart`] - a compatibility axis failed.
    /// - [`GarageError::InsufficientFunds`] - the balance cannot cover the
    ///   price even after the occupant's refund; every prior mutation of
    ///   this call is rolled back.
    pub fn install_part(&mut self, part: &Part) -> Result<InstallOutcome> {
        let vehicle = self.vehicle.as_mut().ok_or(GarageError::VehicleNotSelected)?;

        match check_compatibility(part, vehicle) {
            Compatibility::Incompatible { axis, reason } => {
                return Err(GarageError::IncompatiblePart { axis, reason });
            }
            Compatibility::Compatible { warnings } => {
                for warning in &warnings {
                    tracing::warn!(part = %part.id, "{warning}");
                }
            }
        }

        if vehicle.installed_part(&part.id).is_some() {
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        // Replace-or-add: under an exclusive slot policy the occupant comes
        // out first and its price is refunded.
        let ledger_before = self.ledger;
        let removed = match part.category.slot_policy() {
            SlotPolicy::Exclusive => vehicle
                .installed_parts
                .iter()
                .position(|ip| ip.part.category == part.category)
                .map(|idx| (idx, vehicle.installed_parts.remove(idx))),
            SlotPolicy::Stacking => None,
        };
        if let Some((_, occupant)) = &removed {
            self.ledger.add(occupant.part.price);
        }

        if !self.ledger.spend(part.price) {
            // Roll back the replacement so the call is all-or-nothing. The
            // occupant returns to its original index, keeping the installed
            // order (and therefore the recomputed metrics) bit-identical.
            let available = self.ledger.balance();
            if let Some((idx, occupant)) = removed {
                vehicle.installed_parts.insert(idx, occupant);
            }
            self.ledger = ledger_before;
            return Err(GarageError::InsufficientFunds {
                required: part.price,
                available,
            });
        }

        vehicle.installed_parts.push(InstalledPart::new(part.clone()));
        let outcome = match removed {
            Some((_, occupant)) => InstallOutcome::Replaced {
                removed: occupant.part.id,
            },
            None => InstallOutcome::Installed,
        };

        self.recalculate();
        Ok(outcome)
    }

    /// Remove an installed part, refunding its price.
    ///
    /// Silently does nothing if the part is not installed.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::VehicleNotSelected`] if no vehicle is
    /// selected.
    pub fn uninstall_part(&mut self, part_id: &PartId) -> Result<()> {
        let vehicle = self.vehicle.as_mut().ok_or(GarageError::VehicleNotSelected)?;

        let Some(idx) = vehicle
            .installed_parts
            .iter()
            .position(|ip| ip.part.id == *part_id)
        else {
            return Ok(());
        };

        let removed = vehicle.installed_parts.remove(idx);
        self.ledger.add(removed.part.price);
        self.recalculate();
        Ok(())
    }

    /// What the metrics would become if this part were installed.
    ///
    /// Replace-aware and free of side effects: no money moves, nothing is
    /// mutated. Returns `None` when no vehicle is selected.
    #[must_use]
    pub fn preview_install(&self, part: &Part) -> Option<PerformanceMetrics> {
        let vehicle = self.vehicle.as_ref()?;

        let mut simulated = vehicle.clone();
        if part.category.slot_policy() == SlotPolicy::Exclusive {
            simulated
                .installed_parts
                .retain(|ip| ip.part.category != part.category);
        }
        simulated.installed_parts.push(InstalledPart::new(part.clone()));

        Some(calculate_performance(&simulated))
    }

    /// Overlay tuning settings onto an installed part and recompute.
    ///
    /// Does nothing if the part is not installed.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::VehicleNotSelected`] if no vehicle is
    /// selected.
    pub fn update_tuning(&mut self, part_id: &PartId, settings: TuningSettings) -> Result<()> {
        let vehicle = self.vehicle.as_mut().ok_or(GarageError::VehicleNotSelected)?;

        if let Some(installed) = vehicle
            .installed_parts
            .iter_mut()
            .find(|ip| ip.part.id == *part_id)
        {
            match installed.tuning.as_mut() {
                Some(tuning) => tuning.merge(settings),
                None => installed.tuning = Some(settings),
            }
            self.recalculate();
        }
        Ok(())
    }

    /// Clear tuning overrides from an installed part and recompute.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::VehicleNotSelected`] if no vehicle is
    /// selected.
    pub fn reset_tuning(&mut self, part_id: &PartId) -> Result<()> {
        let vehicle = self.vehicle.as_mut().ok_or(GarageError::VehicleNotSelected)?;

        if let Some(installed) = vehicle
            .installed_parts
            .iter_mut()
            .find(|ip| ip.part.id == *part_id)
        {
            installed.tuning = None;
            self.recalculate();
        }
        Ok(())
    }

    /// Snapshot the current vehicle as a saved build.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::VehicleNotSelected`] if no vehicle is
    /// selected.
    pub fn save_build(&mut self, name: Option<String>) -> Result<SavedBuild> {
        let vehicle = self.vehicle.as_ref().ok_or(GarageError::VehicleNotSelected)?;
        let now = Utc::now();

        let build = SavedBuild {
            id: format!("{}-{}", vehicle.id, now.timestamp_millis()),
            name: name.unwrap_or_else(|| vehicle.display_name()),
            vehicle_id: vehicle.id.clone(),
            vehicle_name: vehicle.name.clone(),
            manufacturer: vehicle.manufacturer.clone(),
            year: vehicle.year,
            installed_parts: vehicle
                .installed_parts
                .iter()
                .map(|ip| InstalledPartSnapshot {
                    part_id: ip.part.id.clone(),
                    installed_at: ip.installed_at,
                })
                .collect(),
            metrics: vehicle.current_metrics,
            saved_at: now,
        };

        Ok(self.builds.save(build).clone())
    }

    /// Delete a saved build.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::BuildNotFound`] if no build has this id.
    pub fn delete_build(&mut self, id: &str) -> Result<()> {
        self.builds.delete(id)
    }

    /// Restore a saved build as the current vehicle.
    ///
    /// Every referenced id is resolved against the catalogs before any
    /// state changes, so a dangling reference leaves the session untouched.
    ///
    /// # Errors
    ///
    /// - [`GarageError::BuildNotFound`] - unknown build id.
    /// - [`GarageError::UnknownVehicle`] / [`GarageError::UnknownPart`] -
    ///   the catalog no longer contains a referenced id.
    pub fn load_build(
        &mut self,
        id: &str,
        parts: &PartRegistry,
        vehicles: &VehicleRegistry,
    ) -> Result<()> {
        let build = self
            .builds
            .get(id)
            .ok_or_else(|| GarageError::BuildNotFound(id.to_string()))?;

        let template = vehicles
            .get(&build.vehicle_id)
            .ok_or_else(|| GarageError::UnknownVehicle(build.vehicle_id.clone()))?;

        let mut installed = Vec::with_capacity(build.installed_parts.len());
        for snapshot in &build.installed_parts {
            let part = parts
                .get(&snapshot.part_id)
                .ok_or_else(|| GarageError::UnknownPart(snapshot.part_id.clone()))?;
            installed.push(InstalledPart {
                part: part.clone(),
                installed_at: snapshot.installed_at,
                tuning: None,
            });
        }

        let mut vehicle = template.clone();
        vehicle.installed_parts = installed;
        self.livery = Livery::default();
        self.vehicle = Some(vehicle);
        self.recalculate();
        Ok(())
    }

    /// The persistable state of this session.
    #[must_use]
    pub fn snapshot(&self) -> GarageSnapshot {
        GarageSnapshot {
            vehicle_id: self.vehicle.as_ref().map(|v| v.id.clone()),
            installed_parts: self
                .vehicle
                .as_ref()
                .map(|v| {
                    v.installed_parts
                        .iter()
                        .map(|ip| InstalledPartSnapshot {
                            part_id: ip.part.id.clone(),
                            installed_at: ip.installed_at,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            saved_builds: self.builds.as_slice().to_vec(),
        }
    }

    /// Recompute the cached metrics from the installed set.
    ///
    /// Called at the end of every mutating operation; safe to call at any
    /// time.
    pub fn recalculate(&mut self) {
        if let Some(vehicle) = self.vehicle.as_mut() {
            vehicle.current_metrics = calculate_performance(vehicle);
            tracing::debug!(
                vehicle = %vehicle.id,
                horsepower = vehicle.current_metrics.horsepower,
                weight = vehicle.current_metrics.weight,
                "Metrics recomputed"
            );
        }
    }
}
