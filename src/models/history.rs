//! Audit trail records appended to a meal entry on every edit.
//!
//! On disk each record is a flat JSON object whose `action` string selects
//! the variant. The portion-adjustment action embeds the item name in the tag
//! (`"Adjusted portion of rice"`), so records go through [`RawHistoryRecord`]
//! instead of a serde-tagged enum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const UPDATED_IMAGE: &str = "Updated image";
const ADDED_ITEM: &str = "Added item";
const ADJUSTED_PORTION_PREFIX: &str = "Adjusted portion of ";
const COMPARED_IMAGE: &str = "Compared new image for remaining calories";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHistoryRecord", into = "RawHistoryRecord")]
pub struct HistoryRecord {
    pub date: DateTime<Utc>,
    pub action: HistoryAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryAction {
    UpdatedImage {
        new_image_path: String,
        new_calories: f64,
    },
    AddedItem {
        new_item: String,
        additional_calories: f64,
    },
    AdjustedPortion {
        item: String,
        fraction: f64,
        original_calories: f64,
        new_calories: f64,
    },
    ComparedImage {
        new_image_path: String,
        original_calories: f64,
        remaining_fraction: f64,
        net_calories: f64,
    },
}

impl HistoryRecord {
    /// Creates a record stamped with the current time.
    pub fn now(action: HistoryAction) -> Self {
        Self {
            date: Utc::now(),
            action,
        }
    }
}

impl HistoryAction {
    /// The `action` string stored in the log file.
    pub fn label(&self) -> String {
        match self {
            HistoryAction::UpdatedImage { .. } => UPDATED_IMAGE.to_string(),
            HistoryAction::AddedItem { .. } => ADDED_ITEM.to_string(),
            HistoryAction::AdjustedPortion { item, .. } => {
                format!("{}{}", ADJUSTED_PORTION_PREFIX, item)
            }
            HistoryAction::ComparedImage { .. } => COMPARED_IMAGE.to_string(),
        }
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.date.format("%Y-%m-%d %H:%M");
        match &self.action {
            HistoryAction::UpdatedImage {
                new_image_path,
                new_calories,
            } => write!(
                f,
                "{} {}: {} ({} kcal)",
                date, UPDATED_IMAGE, new_image_path, new_calories
            ),
            HistoryAction::AddedItem {
                new_item,
                additional_calories,
            } => write!(
                f,
                "{} {}: {} (+{} kcal)",
                date, ADDED_ITEM, new_item, additional_calories
            ),
            HistoryAction::AdjustedPortion {
                fraction,
                original_calories,
                new_calories,
                ..
            } => write!(
                f,
                "{} {}: x{} ({} -> {} kcal)",
                date,
                self.action.label(),
                fraction,
                original_calories,
                new_calories
            ),
            HistoryAction::ComparedImage {
                new_image_path,
                original_calories,
                remaining_fraction,
                net_calories,
            } => write!(
                f,
                "{} {}: {} x{} ({} -> {} kcal)",
                date,
                COMPARED_IMAGE,
                new_image_path,
                remaining_fraction,
                original_calories,
                net_calories
            ),
        }
    }
}

/// Flat on-disk shape of a [`HistoryRecord`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHistoryRecord {
    date: DateTime<Utc>,
    action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    new_image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    new_calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    new_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    additional_calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fraction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remaining_fraction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    net_calories: Option<f64>,
}

impl RawHistoryRecord {
    fn empty(date: DateTime<Utc>, action: String) -> Self {
        Self {
            date,
            action,
            new_image_path: None,
            new_calories: None,
            new_item: None,
            additional_calories: None,
            fraction: None,
            original_calories: None,
            remaining_fraction: None,
            net_calories: None,
        }
    }
}

fn required<T>(value: Option<T>, field: &str, action: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("history record '{}' is missing '{}'", action, field))
}

impl TryFrom<RawHistoryRecord> for HistoryRecord {
    type Error = String;

    fn try_from(raw: RawHistoryRecord) -> Result<Self, Self::Error> {
        let name = raw.action.as_str();
        let action = if name == UPDATED_IMAGE {
            HistoryAction::UpdatedImage {
                new_image_path: required(raw.new_image_path, "newImagePath", name)?,
                new_calories: required(raw.new_calories, "newCalories", name)?,
            }
        } else if name == ADDED_ITEM {
            HistoryAction::AddedItem {
                new_item: required(raw.new_item, "newItem", name)?,
                additional_calories: required(
                    raw.additional_calories,
                    "additionalCalories",
                    name,
                )?,
            }
        } else if let Some(item) = name.strip_prefix(ADJUSTED_PORTION_PREFIX) {
            HistoryAction::AdjustedPortion {
                item: item.to_string(),
                fraction: required(raw.fraction, "fraction", name)?,
                original_calories: required(raw.original_calories, "originalCalories", name)?,
                new_calories: required(raw.new_calories, "newCalories", name)?,
            }
        } else if name == COMPARED_IMAGE {
            HistoryAction::ComparedImage {
                new_image_path: required(raw.new_image_path, "newImagePath", name)?,
                original_calories: required(raw.original_calories, "originalCalories", name)?,
                remaining_fraction: required(
                    raw.remaining_fraction,
                    "remainingFraction",
                    name,
                )?,
                net_calories: required(raw.net_calories, "netCalories", name)?,
            }
        } else {
            return Err(format!("unknown history action '{}'", name));
        };

        Ok(HistoryRecord {
            date: raw.date,
            action,
        })
    }
}

impl From<HistoryRecord> for RawHistoryRecord {
    fn from(record: HistoryRecord) -> Self {
        let mut raw = RawHistoryRecord::empty(record.date, record.action.label());
        match record.action {
            HistoryAction::UpdatedImage {
                new_image_path,
                new_calories,
            } => {
                raw.new_image_path = Some(new_image_path);
                raw.new_calories = Some(new_calories);
            }
            HistoryAction::AddedItem {
                new_item,
                additional_calories,
            } => {
                raw.new_item = Some(new_item);
                raw.additional_calories = Some(additional_calories);
            }
            HistoryAction::AdjustedPortion {
                fraction,
                original_calories,
                new_calories,
                ..
            } => {
                raw.fraction = Some(fraction);
                raw.original_calories = Some(original_calories);
                raw.new_calories = Some(new_calories);
            }
            HistoryAction::ComparedImage {
                new_image_path,
                original_calories,
                remaining_fraction,
                net_calories,
            } => {
                raw.new_image_path = Some(new_image_path);
                raw.original_calories = Some(original_calories);
                raw.remaining_fraction = Some(remaining_fraction);
                raw.net_calories = Some(net_calories);
            }
        }
        raw
    }
}
