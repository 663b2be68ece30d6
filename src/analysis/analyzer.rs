use std::collections::HashSet;
use std::sync::Arc;

use super::{LabelExtractor, NutritionEstimator};
use crate::config::Config;
use crate::models::NutritionDetails;
use crate::services::{EdamamClient, VisionClient};

/// Image labels containing one of these words are treated as food items.
pub const FOOD_KEYWORDS: [&str; 6] = ["food", "burrito", "potato", "salsa", "cheese", "avocado"];

/// Result of analyzing one meal.
#[derive(Debug, Clone, PartialEq)]
pub struct MealAnalysis {
    pub estimated_calories: f64,
    pub nutrition_details: NutritionDetails,
    pub food_items: Vec<String>,
    pub summary: String,
}

/// Combines image labels and the user's description into a nutrition estimate.
#[derive(Clone)]
pub struct MealAnalyzer {
    labels: LabelExtractor,
    nutrition: NutritionEstimator,
}

impl MealAnalyzer {
    pub fn new(labels: LabelExtractor, nutrition: NutritionEstimator) -> Self {
        Self { labels, nutrition }
    }

    /// Builds an analyzer backed by Google Cloud Vision and Edamam.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            LabelExtractor::new(Arc::new(VisionClient::new(&config.vision))),
            NutritionEstimator::new(Arc::new(EdamamClient::new(&config.edamam))),
        )
    }

    pub fn labels(&self) -> &LabelExtractor {
        &self.labels
    }

    pub fn nutrition(&self) -> &NutritionEstimator {
        &self.nutrition
    }

    pub async fn analyze(&self, description: &str, image: &str) -> MealAnalysis {
        let image_items: Vec<String> = self
            .labels
            .extract(image)
            .await
            .into_iter()
            .map(|l| l.description.to_lowercase())
            .filter(|d| is_food_label(d))
            .collect();

        let food_items = merge_items(image_items, description_items(description));
        tracing::debug!("Identified food items: {:?}", food_items);

        let nutrition_details = self.nutrition.estimate(&food_items).await;
        let summary = render_summary(description, &food_items, &nutrition_details);

        MealAnalysis {
            estimated_calories: nutrition_details.calories,
            nutrition_details,
            food_items,
            summary,
        }
    }
}

fn is_food_label(label: &str) -> bool {
    let label = label.to_lowercase();
    FOOD_KEYWORDS.iter().any(|k| label.contains(k))
}

/// Comma-separated segments of the description, trimmed and lowercased.
fn description_items(description: &str) -> Vec<String> {
    description
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Concatenates both lists, keeping the first occurrence of each item
/// (compared case-insensitively).
fn merge_items(first: Vec<String>, second: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

fn render_summary(description: &str, items: &[String], details: &NutritionDetails) -> String {
    let items = if items.is_empty() {
        "none detected".to_string()
    } else {
        items.join(", ")
    };

    format!(
        "I analyzed your meal: {}\n\
         Based on the image and description, I identified the following food items: {}.\n\
         Estimated nutritional breakdown:\n{}",
        description, items, details
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{FakeLabeler, FakeNutrition};

    fn analyzer(labeler: FakeLabeler, nutrition: Arc<FakeNutrition>) -> MealAnalyzer {
        MealAnalyzer::new(
            LabelExtractor::new(Arc::new(labeler)),
            NutritionEstimator::new(nutrition),
        )
    }

    #[test]
    fn test_is_food_label() {
        assert!(is_food_label("Fast food"));
        assert!(is_food_label("Baked Potato"));
        assert!(is_food_label("CHEESE"));
        assert!(!is_food_label("Tableware"));
        assert!(!is_food_label("rice"));
    }

    #[test]
    fn test_description_items() {
        assert_eq!(
            description_items(" Rice , Black Beans,,salsa "),
            vec!["rice", "black beans", "salsa"]
        );
        assert!(description_items("").is_empty());
    }

    #[test]
    fn test_merge_items_dedupes_case_insensitively() {
        let merged = merge_items(
            vec!["cheese".to_string(), "Cheese".to_string()],
            vec!["cheese".to_string(), "rice".to_string()],
        );
        assert_eq!(merged, vec!["cheese", "rice"]);
    }

    #[tokio::test]
    async fn test_labels_and_description_are_merged() {
        let labeler = FakeLabeler::new().with_image(
            "meal.jpg",
            &[("Cheese", 0.9), ("cheese", 0.85), ("Plate", 0.95)],
        );
        let nutrition = Arc::new(
            FakeNutrition::new()
                .with_item("cheese", 110.0)
                .with_item("rice", 200.0),
        );

        let result = analyzer(labeler, nutrition.clone())
            .analyze("cheese, rice", "meal.jpg")
            .await;

        assert_eq!(result.food_items, vec!["cheese", "rice"]);
        assert_eq!(result.estimated_calories, 310.0);
        assert_eq!(result.nutrition_details.calories, 310.0);
        assert_eq!(
            nutrition.calls(),
            vec![vec!["1 cheese".to_string(), "1 rice".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_labeling_failure_uses_description_only() {
        let nutrition = Arc::new(FakeNutrition::new().with_item("toast", 80.0));

        let result = analyzer(FakeLabeler::new(), nutrition)
            .analyze("Toast", "unreadable.jpg")
            .await;

        assert_eq!(result.food_items, vec!["toast"]);
        assert_eq!(result.estimated_calories, 80.0);
        assert!(result.summary.contains("food items: toast."));
    }

    #[tokio::test]
    async fn test_nutrition_failure_gives_zero_breakdown() {
        let labeler = FakeLabeler::new().with_image("b.jpg", &[("Burrito", 0.99)]);

        let result = analyzer(labeler, Arc::new(FakeNutrition::failing()))
            .analyze("burrito", "b.jpg")
            .await;

        assert_eq!(result.food_items, vec!["burrito"]);
        assert!(result.nutrition_details.is_zero());
        assert_eq!(result.estimated_calories, 0.0);
    }

    #[tokio::test]
    async fn test_summary_format() {
        let result = analyzer(FakeLabeler::new(), Arc::new(FakeNutrition::new()))
            .analyze("", "none.jpg")
            .await;

        let expected = "I analyzed your meal: \n\
             Based on the image and description, I identified the following food items: none detected.\n\
             Estimated nutritional breakdown:\n\
             - Calories: 0 kcal\n\
             - Protein: 0.0 g\n\
             - Fat: 0.0 g\n\
             - Carbs: 0.0 g\n\
             - Fiber: 0.0 g\n\
             - Sugar: 0.0 g\n\
             - Sodium: 0.0 mg\n";
        assert_eq!(result.summary, expected);
    }
}
