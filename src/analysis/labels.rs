use std::sync::Arc;

use crate::models::Label;
use crate::services::ImageLabeler;

/// Labels at or below this confidence are discarded.
pub const MIN_CONFIDENCE: f64 = 0.7;

/// Fail-open wrapper around an [`ImageLabeler`].
#[derive(Clone)]
pub struct LabelExtractor {
    labeler: Arc<dyn ImageLabeler>,
}

impl LabelExtractor {
    pub fn new(labeler: Arc<dyn ImageLabeler>) -> Self {
        Self { labeler }
    }

    /// Returns the confident labels for `image`, or an empty list if labeling
    /// failed for any reason.
    pub async fn extract(&self, image: &str) -> Vec<Label> {
        match self.labeler.label_image(image).await {
            Ok(labels) => labels
                .into_iter()
                .filter(|l| l.score > MIN_CONFIDENCE)
                .collect(),
            Err(e) => {
                tracing::warn!("Error labeling image '{}': {}", image, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeLabeler;

    #[tokio::test]
    async fn test_filters_low_confidence() {
        let labeler = FakeLabeler::new().with_image(
            "plate.jpg",
            &[("Food", 0.95), ("Plate", 0.7), ("Salsa", 0.71), ("Fork", 0.2)],
        );
        let extractor = LabelExtractor::new(Arc::new(labeler));

        let labels = extractor.extract("plate.jpg").await;
        let names: Vec<&str> = labels.iter().map(|l| l.description.as_str()).collect();
        assert_eq!(names, vec!["Food", "Salsa"]);
    }

    #[tokio::test]
    async fn test_failure_yields_empty() {
        let extractor = LabelExtractor::new(Arc::new(FakeLabeler::new()));
        assert!(extractor.extract("missing.jpg").await.is_empty());
    }
}
