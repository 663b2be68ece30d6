//! In-memory stand-ins for the external services.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{ImageLabeler, LabelError, NutritionError, NutritionSource};
use crate::models::{Label, NutritionDetails};

/// Returns canned labels per image; unknown images fail.
#[derive(Default)]
pub struct FakeLabeler {
    images: HashMap<String, Vec<Label>>,
}

impl FakeLabeler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, image: &str, labels: &[(&str, f64)]) -> Self {
        let labels = labels.iter().map(|(d, s)| Label::new(*d, *s)).collect();
        self.images.insert(image.to_string(), labels);
        self
    }
}

#[async_trait]
impl ImageLabeler for FakeLabeler {
    async fn label_image(&self, image: &str) -> Result<Vec<Label>, LabelError> {
        self.images
            .get(image)
            .cloned()
            .ok_or_else(|| LabelError::Api(format!("unknown image {}", image)))
    }
}

/// Sums canned per-item nutrition and records every request.
#[derive(Default)]
pub struct FakeNutrition {
    items: HashMap<String, NutritionDetails>,
    failing: bool,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeNutrition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_item(mut self, item: &str, calories: f64) -> Self {
        self.items.insert(
            item.to_string(),
            NutritionDetails {
                calories,
                protein: calories / 100.0,
                ..NutritionDetails::zero()
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NutritionSource for FakeNutrition {
    async fn analyze(&self, ingredients: &[String]) -> Result<NutritionDetails, NutritionError> {
        self.calls.lock().unwrap().push(ingredients.to_vec());

        if self.failing {
            return Err(NutritionError::NotConfigured);
        }

        let mut total = NutritionDetails::zero();
        for line in ingredients {
            let item = line.strip_prefix("1 ").unwrap_or(line);
            if let Some(d) = self.items.get(item) {
                total.calories += d.calories;
                total.protein += d.protein;
            }
        }
        Ok(total)
    }
}
