mod history;
mod label;
mod meal_entry;
mod nutrition;

pub use history::{HistoryAction, HistoryRecord};
pub use label::Label;
pub use meal_entry::MealEntry;
pub use nutrition::NutritionDetails;
