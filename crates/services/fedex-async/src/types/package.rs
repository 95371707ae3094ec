//! Package weight and dimension model.

use serde::{Deserialize, Serialize};

/// Divisor for metric dimensional weight (cm³ per kg), fixed by the carrier.
pub const DIM_WEIGHT_DIVISOR: f64 = 5_000.0;

/// Physical measurements for one shippable package.
///
/// Values are metric: kilograms and centimeters. Instances come from the
/// dimension catalog per request; nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDimensions {
    /// Actual weight in kilograms.
    pub weight_kg: f64,
    /// Length in centimeters.
    pub length_cm: f64,
    /// Width in centimeters.
    pub width_cm: f64,
    /// Height in centimeters.
    pub height_cm: f64,
}

impl PackageDimensions {
    /// Volume-based weight approximation: `length * width * height / 5000`.
    #[must_use]
    pub fn dimensional_weight(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm / DIM_WEIGHT_DIVISOR
    }

    /// The weight the carrier actually charges against: the greater of the
    /// actual and dimensional weights.
    #[must_use]
    pub fn billed_weight(&self) -> f64 {
        self.weight_kg.max(self.dimensional_weight())
    }

    /// Whether every measurement is strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weight_kg > 0.0 && self.length_cm > 0.0 && self.width_cm > 0.0 && self.height_cm > 0.0
    }
}
