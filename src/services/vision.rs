use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{ImageLabeler, LabelError};
use crate::config::VisionConfig;
use crate::models::Label;

/// Number of labels requested per image
const MAX_RESULTS: u32 = 10;

/// Google Cloud Vision label detection over the REST `images:annotate` endpoint.
#[derive(Debug, Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl VisionClient {
    pub fn new(config: &VisionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
        }
    }
}

#[derive(Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Serialize)]
struct AnnotateImageRequest {
    image: Image,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<ImageSource>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageSource {
    image_uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    max_results: u32,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Deserialize)]
struct LabelAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    score: f64,
}

#[derive(Deserialize)]
struct ApiStatus {
    #[serde(default)]
    message: String,
}

fn is_remote(image: &str) -> bool {
    image.starts_with("http://") || image.starts_with("https://") || image.starts_with("gs://")
}

/// Builds the image part of the request: remote references go by URI, local
/// files are inlined as base64.
async fn image_payload(image: &str) -> Result<Image, LabelError> {
    if is_remote(image) {
        return Ok(Image {
            content: None,
            source: Some(ImageSource {
                image_uri: image.to_string(),
            }),
        });
    }

    let path = PathBuf::from(image);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| LabelError::ReadImage { path, source })?;

    Ok(Image {
        content: Some(STANDARD.encode(bytes)),
        source: None,
    })
}

#[async_trait]
impl ImageLabeler for VisionClient {
    async fn label_image(&self, image: &str) -> Result<Vec<Label>, LabelError> {
        let api_key = self.api_key.as_ref().ok_or(LabelError::NotConfigured)?;

        let request = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: image_payload(image).await?,
                features: vec![Feature {
                    kind: "LABEL_DETECTION",
                    max_results: MAX_RESULTS,
                }],
            }],
        };

        tracing::debug!("Requesting labels for {}", image);

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LabelError::Api(format!("status {}: {}", status, body)));
        }

        let body: AnnotateResponse = response.json().await?;
        let first = match body.responses.into_iter().next() {
            Some(r) => r,
            None => return Ok(Vec::new()),
        };

        if let Some(err) = first.error {
            return Err(LabelError::Api(err.message));
        }

        Ok(first
            .label_annotations
            .into_iter()
            .map(|a| Label::new(a.description, a.score))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> VisionClient {
        VisionClient::new(&VisionConfig {
            api_key: api_key.map(str::to_string),
            endpoint: format!("{}/v1/images:annotate", server.uri()),
        })
    }

    #[tokio::test]
    async fn test_labels_remote_image() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "requests": [{
                    "image": {"source": {"imageUri": "https://example.com/lunch.jpg"}},
                    "features": [{"type": "LABEL_DETECTION", "maxResults": 10}]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [{
                    "labelAnnotations": [
                        {"description": "Food", "score": 0.98},
                        {"description": "Burrito", "score": 0.91},
                        {"description": "Table", "score": 0.55}
                    ]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        let labels = client
            .label_image("https://example.com/lunch.jpg")
            .await
            .unwrap();

        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0], Label::new("Food", 0.98));
        assert_eq!(labels[2].description, "Table");
    }

    #[tokio::test]
    async fn test_local_image_sent_as_base64() {
        let server = MockServer::start().await;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"fake-jpeg").unwrap();
        let encoded = STANDARD.encode(b"fake-jpeg");

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "requests": [{"image": {"content": encoded}}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [{"labelAnnotations": [{"description": "Cheese", "score": 0.8}]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        let labels = client
            .label_image(file.path().to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(labels, vec![Label::new("Cheese", 0.8)]);
    }

    #[tokio::test]
    async fn test_missing_image_file() {
        let server = MockServer::start().await;
        let client = client_for(&server, Some("test-key"));

        let err = client
            .label_image("/definitely/not/here.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, LabelError::ReadImage { .. }));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let server = MockServer::start().await;
        let client = client_for(&server, None);

        let err = client.label_image("https://example.com/a.jpg").await.unwrap_err();
        assert!(matches!(err, LabelError::NotConfigured));
    }

    #[tokio::test]
    async fn test_per_image_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [{"error": {"code": 7, "message": "permission denied"}}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        let err = client.label_image("gs://bucket/a.jpg").await.unwrap_err();
        assert!(err.to_string().contains("permission denied"));
    }

    #[tokio::test]
    async fn test_auth_failure_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("bad-key"));
        let err = client.label_image("gs://bucket/a.jpg").await.unwrap_err();
        assert!(matches!(err, LabelError::Api(ref msg) if msg.contains("403")));
    }
}
