//! Clients for the two external services a meal analysis depends on.
//!
//! - [`ImageLabeler`]: returns labels for an image (Google Cloud Vision)
//! - [`NutritionSource`]: returns a nutrition breakdown for ingredient lines
//!   such as `"1 banana"` (Edamam Nutrition Analysis)
//!
//! Callers never see these errors directly: the fail-open wrappers in
//! [`crate::analysis`] log them and fall back to empty results.

mod edamam;
mod vision;

#[cfg(test)]
pub(crate) mod fakes;

pub use edamam::EdamamClient;
pub use vision::VisionClient;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{Label, NutritionDetails};

#[async_trait]
pub trait ImageLabeler: Send + Sync {
    /// Labels the image at `image`, a local path or an `http(s)://` / `gs://` URI.
    async fn label_image(&self, image: &str) -> Result<Vec<Label>, LabelError>;
}

#[async_trait]
pub trait NutritionSource: Send + Sync {
    /// Returns the aggregate nutrition of the given ingredient lines.
    async fn analyze(&self, ingredients: &[String]) -> Result<NutritionDetails, NutritionError>;
}

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Vision API key not configured. Set GOOGLE_VISION_API_KEY or vision.api_key in config.")]
    NotConfigured,
    #[error("Failed to read image '{}': {source}", .path.display())]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Vision API error: {0}")]
    Api(String),
}

#[derive(Debug, Error)]
pub enum NutritionError {
    #[error("Edamam credentials not configured. Set EDAMAM_APP_ID and EDAMAM_APP_KEY.")]
    NotConfigured,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Edamam API returned status {status}: {body}")]
    Api { status: u16, body: String },
}
