use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::history::HistoryRecord;
use super::nutrition::NutritionDetails;

/// One logged meal as stored in the nutrition log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub date: DateTime<Utc>,
    pub description: String,
    pub estimated_calories: f64,
    #[serde(default)]
    pub food_items: Vec<String>,
    #[serde(default)]
    pub nutrition_details: NutritionDetails,
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
}

impl MealEntry {
    pub fn new(description: impl Into<String>, image_path: impl Into<String>) -> Self {
        Self {
            date: Utc::now(),
            description: description.into(),
            estimated_calories: 0.0,
            food_items: Vec::new(),
            nutrition_details: NutritionDetails::zero(),
            image_path: image_path.into(),
            history: Vec::new(),
        }
    }

    /// Sets the nutrition breakdown and keeps `estimated_calories` in step with it.
    pub fn with_nutrition(mut self, details: NutritionDetails) -> Self {
        self.estimated_calories = details.calories;
        self.nutrition_details = details;
        self
    }

    pub fn with_food_items(mut self, items: Vec<String>) -> Self {
        self.food_items = items;
        self
    }

    /// Label used when choosing a meal from a list.
    pub fn choice_label(&self, index: usize) -> String {
        format!(
            "{}. {} ({})",
            index + 1,
            self.description,
            self.date.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

impl fmt::Display for MealEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Meal: {}", self.description)?;
        writeln!(f, "{}", "=".repeat(30))?;
        writeln!(f, "Date: {}", self.date.format("%Y-%m-%d %H:%M"))?;
        writeln!(f, "Image: {}", self.image_path)?;
        writeln!(f, "Estimated calories: {} kcal", self.estimated_calories)?;

        if !self.food_items.is_empty() {
            writeln!(f, "Food items: {}", self.food_items.join(", "))?;
        }

        if !self.history.is_empty() {
            writeln!(f, "History:")?;
            for record in &self.history {
                writeln!(f, "  - {}", record)?;
            }
        }

        Ok(())
    }
}
