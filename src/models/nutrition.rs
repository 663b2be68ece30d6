use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate nutrition breakdown for a meal.
///
/// Every field defaults to 0 when it is missing from stored data or from the
/// nutrition service's response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionDetails {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

impl NutritionDetails {
    /// The all-zero breakdown used when nutrition is unknown.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl fmt::Display for NutritionDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Calories: {} kcal", self.calories.round() as i64)?;
        writeln!(f, "- Protein: {:.1} g", self.protein)?;
        writeln!(f, "- Fat: {:.1} g", self.fat)?;
        writeln!(f, "- Carbs: {:.1} g", self.carbs)?;
        writeln!(f, "- Fiber: {:.1} g", self.fiber)?;
        writeln!(f, "- Sugar: {:.1} g", self.sugar)?;
        writeln!(f, "- Sodium: {:.1} mg", self.sodium)
    }
}
