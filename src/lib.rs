//! mealsnap: log meals from a photo and a short description.
//!
//! A meal is analyzed by combining image labels (Google Cloud Vision) with
//! the user's description, estimating its nutrition (Edamam), and appending
//! the result to a JSON log. Logged meals can later be edited with a new
//! photo, a free-text update, or a photo of what is left.

pub mod analysis;
pub mod commands;
pub mod config;
pub mod editor;
pub mod models;
pub mod services;
pub mod store;

pub use analysis::{LabelExtractor, MealAnalysis, MealAnalyzer, NutritionEstimator};
pub use config::{Config, ConfigError};
pub use editor::{EditError, EditOperation, EditOutcome, MealEditor};
pub use models::{HistoryAction, HistoryRecord, Label, MealEntry, NutritionDetails};
pub use store::{LogStore, StoreError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
