//! Edits to an already logged meal.
//!
//! Each edit produces a new [`MealEntry`] that replaces the old one at the
//! same index and carries exactly one additional [`HistoryRecord`].

mod instruction;

pub use instruction::{parse_instruction, ChatUpdate, Fraction, FractionError, ADD_ITEM_PHRASE};

use std::fmt;
use thiserror::Error;

use crate::analysis::MealAnalyzer;
use crate::models::{HistoryAction, HistoryRecord, MealEntry};

/// The three ways a meal can be edited, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOption {
    UploadImage,
    ChatUpdate,
    CompareImage,
}

impl EditOption {
    pub const ALL: [EditOption; 3] = [
        EditOption::UploadImage,
        EditOption::ChatUpdate,
        EditOption::CompareImage,
    ];
}

impl fmt::Display for EditOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOption::UploadImage => write!(f, "Upload a new image"),
            EditOption::ChatUpdate => write!(f, "Update details via chat"),
            EditOption::CompareImage => {
                write!(f, "Compare a new image to estimate remaining calories")
            }
        }
    }
}

/// An edit with its user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    /// Re-analyze the meal with a new image
    NewImage(String),
    /// Apply a free-text update
    Chat(String),
    /// Estimate what is left from a photo of the remains
    CompareImage(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Applied { entry: MealEntry, message: String },
    Unchanged { reason: String },
}

impl EditOutcome {
    fn unchanged(reason: impl Into<String>) -> Self {
        EditOutcome::Unchanged {
            reason: reason.into(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Fraction(#[from] FractionError),
    #[error("Meal {index} does not exist ({len} meal(s) logged)")]
    IndexOutOfRange { index: usize, len: usize },
}

pub const NO_MEALS: &str = "No meals to edit.";

pub const CHAT_HELP: &str = "Could not understand the update. Use a format like \
     \"I also had a diet Mountain Dew\" or \"I only ate 1/2 of my potatoes\".";

pub struct MealEditor<'a> {
    analyzer: &'a MealAnalyzer,
}

impl<'a> MealEditor<'a> {
    pub fn new(analyzer: &'a MealAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Applies `operation` to the meal at `index`, replacing it in place when
    /// the edit succeeds. An empty log is left untouched.
    pub async fn edit_meal(
        &self,
        entries: &mut [MealEntry],
        index: usize,
        operation: &EditOperation,
    ) -> Result<EditOutcome, EditError> {
        if entries.is_empty() {
            return Ok(EditOutcome::unchanged(NO_MEALS));
        }

        let current = entries.get(index).ok_or(EditError::IndexOutOfRange {
            index,
            len: entries.len(),
        })?;

        let outcome = self.apply(current, operation).await?;
        if let EditOutcome::Applied { entry, .. } = &outcome {
            entries[index] = entry.clone();
        }

        Ok(outcome)
    }

    pub async fn apply(
        &self,
        entry: &MealEntry,
        operation: &EditOperation,
    ) -> Result<EditOutcome, EditError> {
        match operation {
            EditOperation::NewImage(image) => Ok(self.upload_new_image(entry, image).await),
            EditOperation::Chat(text) => self.chat_update(entry, text).await,
            EditOperation::CompareImage(image) => Ok(self.compare_image(entry, image).await),
        }
    }

    async fn upload_new_image(&self, entry: &MealEntry, image: &str) -> EditOutcome {
        let analysis = self.analyzer.analyze(&entry.description, image).await;

        let mut updated = entry.clone();
        updated.image_path = image.to_string();
        updated.estimated_calories = analysis.estimated_calories;
        updated.nutrition_details = analysis.nutrition_details;
        updated.food_items = analysis.food_items;
        updated
            .history
            .push(HistoryRecord::now(HistoryAction::UpdatedImage {
                new_image_path: image.to_string(),
                new_calories: analysis.estimated_calories,
            }));

        EditOutcome::Applied {
            entry: updated,
            message: analysis.summary,
        }
    }

    async fn chat_update(&self, entry: &MealEntry, text: &str) -> Result<EditOutcome, EditError> {
        match parse_instruction(text) {
            ChatUpdate::AddItem(item) => Ok(self.add_item(entry, item).await),
            ChatUpdate::AdjustPortion { fraction, item } => {
                adjust_portion(entry, fraction, &item)
            }
            ChatUpdate::Unrecognized => Ok(EditOutcome::unchanged(CHAT_HELP)),
        }
    }

    async fn add_item(&self, entry: &MealEntry, item: String) -> EditOutcome {
        let details = self
            .analyzer
            .nutrition()
            .estimate(std::slice::from_ref(&item))
            .await;
        let additional = details.calories;

        let mut updated = entry.clone();
        updated.description = format!("{}, {}", updated.description, item);
        updated.estimated_calories += additional;

        let message = format!(
            "Added {} with {} calories. New total: {} kcal.",
            item, additional, updated.estimated_calories
        );

        updated
            .history
            .push(HistoryRecord::now(HistoryAction::AddedItem {
                new_item: item,
                additional_calories: additional,
            }));

        EditOutcome::Applied {
            entry: updated,
            message,
        }
    }

    async fn compare_image(&self, entry: &MealEntry, image: &str) -> EditOutcome {
        let labels = self.analyzer.labels();
        let original_count = labels.extract(&entry.image_path).await.len();
        let new_count = labels.extract(image).await.len();

        // Label count stands in for how much food is left on the plate.
        let remaining_fraction = new_count as f64 / original_count.max(1) as f64;
        let original_calories = entry.estimated_calories;
        let net_calories = (original_calories * remaining_fraction).round();

        let mut updated = entry.clone();
        updated.estimated_calories = net_calories;
        updated
            .history
            .push(HistoryRecord::now(HistoryAction::ComparedImage {
                new_image_path: image.to_string(),
                original_calories,
                remaining_fraction,
                net_calories,
            }));

        EditOutcome::Applied {
            entry: updated,
            message: format!(
                "Estimated remaining portion: {:.0}%. Net calories: {} kcal.",
                remaining_fraction * 100.0,
                net_calories
            ),
        }
    }
}

fn adjust_portion(
    entry: &MealEntry,
    fraction: Fraction,
    item: &str,
) -> Result<EditOutcome, EditError> {
    let ratio = fraction.ratio()?;

    if !entry.description.to_lowercase().contains(item) {
        return Ok(EditOutcome::unchanged(format!(
            "Item \"{}\" not found in meal description.",
            item
        )));
    }

    let original_calories = entry.estimated_calories;
    let new_calories = (original_calories * ratio).round();

    let mut updated = entry.clone();
    updated.estimated_calories = new_calories;
    updated
        .history
        .push(HistoryRecord::now(HistoryAction::AdjustedPortion {
            item: item.to_string(),
            fraction: ratio,
            original_calories,
            new_calories,
        }));

    Ok(EditOutcome::Applied {
        entry: updated,
        message: format!(
            "Adjusted {} to {:.0}% of original. New total: {} kcal.",
            item,
            ratio * 100.0,
            new_calories
        ),
    })
}
