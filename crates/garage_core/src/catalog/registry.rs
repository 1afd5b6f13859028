//! Id-keyed catalog registries.
//!
//! Registries reject duplicate ids at registration time and iterate in
//! sorted id order so every traversal is deterministic.

use std::collections::HashMap;

use crate::error::{GarageError, Result};

use super::part::{Part, PartCategory, PartId};
use super::vehicle::{Vehicle, VehicleId};

/// All loaded catalog parts, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct PartRegistry {
    parts: HashMap<PartId, Part>,
}

impl PartRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parts: HashMap::new(),
        }
    }

    /// Register a part.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::DuplicatePart`] if a part with the same id is
    /// already registered.
    pub fn register(&mut self, part: Part) -> Result<()> {
        if self.parts.contains_key(&part.id) {
            return Err(GarageError::DuplicatePart(part.id));
        }
        self.parts.insert(part.id.clone(), part);
        Ok(())
    }

    /// Get a part by id.
    #[must_use]
    pub fn get(&self, id: &PartId) -> Option<&Part> {
        self.parts.get(id)
    }

    /// Number of registered parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate over all parts in sorted id order.
    pub fn iter(&self) -> impl Iterator<Item = &Part> {
        let mut parts: Vec<&Part> = self.parts.values().collect();
        parts.sort_by(|a, b| a.id.cmp(&b.id));
        parts.into_iter()
    }

    /// All parts of a category, in sorted id order.
    #[must_use]
    pub fn parts_in_category(&self, category: PartCategory) -> Vec<&Part> {
        self.iter().filter(|p| p.category == category).collect()
    }
}

/// All loaded vehicle templates, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct VehicleRegistry {
    vehicles: HashMap<VehicleId, Vehicle>,
}

impl VehicleRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vehicles: HashMap::new(),
        }
    }

    /// Register a vehicle template.
    ///
    /// # Errors
    ///
    /// Returns [`GarageError::DuplicateVehicle`] if a vehicle with the same
    /// id is already registered.
    pub fn register(&mut self, vehicle: Vehicle) -> Result<()> {
        if self.vehicles.contains_key(&vehicle.id) {
            return Err(GarageError::DuplicateVehicle(vehicle.id));
        }
        self.vehicles.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    /// Get a vehicle template by id.
    #[must_use]
    pub fn get(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id)
    }

    /// Number of registered vehicles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Check whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Iterate over all vehicle templates in sorted id order.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        let mut vehicles: Vec<&Vehicle> = self.vehicles.values().collect();
        vehicles.sort_by(|a, b| a.id.cmp(&b.id));
        vehicles.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(id: &str, category: PartCategory) -> Part {
        Part::new(id, id.to_uppercase(), "Testbrand", category, 100, 1.0)
    }

    #[test]
    fn register_rejects_duplicate_part() {
        let mut registry = PartRegistry::new();
        registry.register(part("exhaust-a", PartCategory::Exhaust)).unwrap();

        let err = registry
            .register(part("exhaust-a", PartCategory::Exhaust))
            .unwrap_err();
        assert_eq!(err, GarageError::DuplicatePart(PartId::new("exhaust-a")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn iteration_is_sorted_by_id() {
        let mut registry = PartRegistry::new();
        for id in ["zeta", "alpha", "mid"] {
            registry.register(part(id, PartCategory::Exhaust)).unwrap();
        }

        let ids: Vec<&str> = registry.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn category_query_filters() {
        let mut registry = PartRegistry::new();
        registry.register(part("exhaust-a", PartCategory::Exhaust)).unwrap();
        registry.register(part("wheels-a", PartCategory::Wheels)).unwrap();
        registry.register(part("exhaust-b", PartCategory::Exhaust)).unwrap();

        let exhausts = registry.parts_in_category(PartCategory::Exhaust);
        assert_eq!(exhausts.len(), 2);
        assert!(exhausts.iter().all(|p| p.category == PartCategory::Exhaust));
    }
}
