//! Meal analysis built on the image-labeling and nutrition services.
//!
//! Both service wrappers are fail-open: a failed call is logged and replaced
//! by an empty label list or an all-zero nutrition breakdown, so logging a
//! meal never stops because a service is down.

mod analyzer;
mod estimator;
mod labels;

pub use analyzer::{MealAnalysis, MealAnalyzer, FOOD_KEYWORDS};
pub use estimator::NutritionEstimator;
pub use labels::{LabelExtractor, MIN_CONFIDENCE};
