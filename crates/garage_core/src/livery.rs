//! Vehicle-scoped paint and finish state.
//!
//! Livery is cosmetic: it never feeds the performance aggregator. It is
//! vehicle-scoped customization, so selecting a different vehicle resets it
//! to the defaults below.

use serde::{Deserialize, Serialize};

/// Paint finish applied to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum FinishType {
    Gloss,
    Matte,
    Satin,
    Metallic,
    Pearl,
    Chrome,
}

/// Per-zone paint colors, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct VehicleColors {
    pub body: String,
    pub wheels: String,
    pub calipers: String,
    pub interior: String,
    pub accents: String,
    pub aero: String,
    pub lights: String,
}

impl Default for VehicleColors {
    fn default() -> Self {
        Self {
            body: "#1a1a2e".to_string(),
            wheels: "#4a4a4a".to_string(),
            calipers: "#dc2626".to_string(),
            interior: "#1a1a2e".to_string(),
            accents: "#00d4ff".to_string(),
            aero: "#1a1a2e".to_string(),
            lights: "#ffffff".to_string(),
        }
    }
}

/// Per-zone paint finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct VehicleFinishes {
    pub body: FinishType,
    pub wheels: FinishType,
    pub calipers: FinishType,
    pub interior: FinishType,
    pub accents: FinishType,
    pub aero: FinishType,
    pub lights: FinishType,
}

impl Default for VehicleFinishes {
    fn default() -> Self {
        Self {
            body: FinishType::Gloss,
            wheels: FinishType::Gloss,
            calipers: FinishType::Gloss,
            interior: FinishType::Matte,
            accents: FinishType::Metallic,
            aero: FinishType::Matte,
            lights: FinishType::Gloss,
        }
    }
}

/// Complete livery state for the current vehicle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Livery {
    /// Zone colors.
    pub colors: VehicleColors,
    /// Zone finishes.
    pub finishes: VehicleFinishes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_factory_palette() {
        let livery = Livery::default();
        assert_eq!(livery.colors.body, "#1a1a2e");
        assert_eq!(livery.colors.calipers, "#dc2626");
        assert_eq!(livery.finishes.interior, FinishType::Matte);
        assert_eq!(livery.finishes.body, FinishType::Gloss);
    }
}
