use std::sync::Arc;

use crate::models::NutritionDetails;
use crate::services::NutritionSource;

/// Fail-open wrapper around a [`NutritionSource`].
#[derive(Clone)]
pub struct NutritionEstimator {
    source: Arc<dyn NutritionSource>,
}

impl NutritionEstimator {
    pub fn new(source: Arc<dyn NutritionSource>) -> Self {
        Self { source }
    }

    /// Estimates the nutrition of one unit of each item.
    ///
    /// Returns the all-zero breakdown when `items` is empty or the service
    /// call fails.
    pub async fn estimate(&self, items: &[String]) -> NutritionDetails {
        if items.is_empty() {
            return NutritionDetails::zero();
        }

        let ingredients: Vec<String> = items.iter().map(|item| format!("1 {}", item)).collect();

        match self.source.analyze(&ingredients).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!("Error estimating nutrition: {}", e);
                NutritionDetails::zero()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeNutrition;

    #[tokio::test]
    async fn test_each_item_requested_as_one_unit() {
        let source = Arc::new(FakeNutrition::new().with_item("banana", 105.0));
        let estimator = NutritionEstimator::new(source.clone());

        let details = estimator
            .estimate(&["banana".to_string(), "diet soda".to_string()])
            .await;

        assert_eq!(details.calories, 105.0);
        assert_eq!(
            source.calls(),
            vec![vec!["1 banana".to_string(), "1 diet soda".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_failure_yields_all_zero() {
        let estimator = NutritionEstimator::new(Arc::new(FakeNutrition::failing()));
        let details = estimator.estimate(&["rice".to_string()]).await;
        assert!(details.is_zero());
    }

    #[tokio::test]
    async fn test_empty_items_skip_the_service() {
        let source = Arc::new(FakeNutrition::new());
        let estimator = NutritionEstimator::new(source.clone());

        assert!(estimator.estimate(&[]).await.is_zero());
        assert!(source.calls().is_empty());
    }
}
