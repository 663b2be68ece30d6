use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{NutritionError, NutritionSource};
use crate::config::EdamamConfig;
use crate::models::NutritionDetails;

/// Edamam Nutrition Analysis client.
#[derive(Debug, Clone)]
pub struct EdamamClient {
    http: reqwest::Client,
    config: EdamamConfig,
}

impl EdamamClient {
    pub fn new(config: &EdamamConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: config.clone(),
        }
    }
}

#[derive(Serialize)]
struct NutritionRequest<'a> {
    ingr: &'a [String],
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct NutritionResponse {
    calories: f64,
    total_nutrients: HashMap<String, NutrientQuantity>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct NutrientQuantity {
    quantity: f64,
}

impl NutritionResponse {
    fn quantity(&self, code: &str) -> f64 {
        self.total_nutrients
            .get(code)
            .map(|n| n.quantity)
            .unwrap_or(0.0)
    }

    fn into_details(self) -> NutritionDetails {
        NutritionDetails {
            calories: self.calories,
            protein: self.quantity("PROCNT"),
            fat: self.quantity("FAT"),
            carbs: self.quantity("CHOCDF"),
            fiber: self.quantity("FIBTG"),
            sugar: self.quantity("SUGAR"),
            sodium: self.quantity("NA"),
        }
    }
}

#[async_trait]
impl NutritionSource for EdamamClient {
    async fn analyze(&self, ingredients: &[String]) -> Result<NutritionDetails, NutritionError> {
        let (app_id, app_key) = match (&self.config.app_id, &self.config.app_key) {
            (Some(id), Some(key)) => (id, key),
            _ => return Err(NutritionError::NotConfigured),
        };

        tracing::debug!("Requesting nutrition for {:?}", ingredients);

        let response = self
            .http
            .post(&self.config.endpoint)
            .query(&[("app_id", app_id), ("app_key", app_key)])
            .json(&NutritionRequest { ingr: ingredients })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NutritionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: NutritionResponse = response.json().await?;
        Ok(body.into_details())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> EdamamClient {
        EdamamClient::new(&EdamamConfig {
            app_id: Some("test-id".to_string()),
            app_key: Some("test-key".to_string()),
            endpoint: format!("{}/api/nutrition-details", server.uri()),
        })
    }

    #[tokio::test]
    async fn test_analyze_maps_nutrient_codes() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/nutrition-details"))
            .and(query_param("app_id", "test-id"))
            .and(query_param("app_key", "test-key"))
            .and(body_json(json!({"ingr": ["1 banana", "1 rice"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "calories": 311,
                "totalNutrients": {
                    "PROCNT": {"label": "Protein", "quantity": 5.6, "unit": "g"},
                    "FAT": {"label": "Fat", "quantity": 0.7, "unit": "g"},
                    "CHOCDF": {"label": "Carbs", "quantity": 71.2, "unit": "g"},
                    "FIBTG": {"label": "Fiber", "quantity": 3.7, "unit": "g"},
                    "NA": {"label": "Sodium", "quantity": 2.4, "unit": "mg"}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let details = client
            .analyze(&["1 banana".to_string(), "1 rice".to_string()])
            .await
            .unwrap();

        assert_eq!(details.calories, 311.0);
        assert_eq!(details.protein, 5.6);
        assert_eq!(details.carbs, 71.2);
        assert_eq!(details.sodium, 2.4);
        // SUGAR absent from the response
        assert_eq!(details.sugar, 0.0);
    }

    #[tokio::test]
    async fn test_empty_body_defaults_to_zero() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let details = client.analyze(&["1 water".to_string()]).await.unwrap();
        assert!(details.is_zero());
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.analyze(&["1 egg".to_string()]).await.unwrap_err();
        assert!(matches!(err, NutritionError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let client = EdamamClient::new(&EdamamConfig::default());
        let err = client.analyze(&["1 egg".to_string()]).await.unwrap_err();
        assert!(matches!(err, NutritionError::NotConfigured));
    }
}
