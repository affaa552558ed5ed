use crate::config::ApiConfig;
use crate::error::{KrishiMitraError, Result};
use crate::models::{PredictionOutcome, PredictionRequest};
use reqwest::StatusCode;
use serde_json::Value;

const PREDICT_PATH: &str = "/predict";

/// Client for the yield model service.
///
/// One request, one response: no timeout, no retry. Any failure is handed
/// straight back to the caller.
pub struct PredictionClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl PredictionClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), PREDICT_PATH)
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionOutcome> {
        let url = self.endpoint();
        tracing::debug!(
            %url,
            district = %request.district,
            crop = %request.crop,
            "Requesting prediction"
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| KrishiMitraError::ServiceUnavailable(format!("{}: {}", url, e)))?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(status, &text);
            tracing::info!(status = status.as_u16(), "Prediction rejected: {}", message);
            return Err(KrishiMitraError::Prediction {
                status: status.as_u16(),
                message,
            });
        }

        let outcome = PredictionOutcome::parse(&text);
        if outcome.is_raw() {
            tracing::warn!(
                "Prediction service returned a non-JSON body ({} bytes); treating it as raw text",
                text.len()
            );
        }

        Ok(outcome)
    }

    /// Whether anything answers at the base URL. Any HTTP status counts.
    pub async fn test_connection(&self) -> Result<bool> {
        match self.client.get(&self.config.base_url).send().await {
            Ok(response) => {
                tracing::debug!(
                    status = response.status().as_u16(),
                    "Prediction service reachable"
                );
                Ok(true)
            }
            Err(e) => {
                tracing::debug!("Prediction service unreachable: {}", e);
                Ok(false)
            }
        }
    }
}

/// Message for a non-success response.
///
/// A JSON body contributes its `detail`, then its `error`, then the body
/// itself. Anything else falls back to the raw text, then the status reason.
pub fn error_message(status: StatusCode, text: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        let field = ["detail", "error"]
            .iter()
            .filter_map(|key| value.get(*key))
            .find_map(present_text);

        return field.unwrap_or_else(|| value.to_string());
    }

    if !text.is_empty() {
        return text.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Crop, District, PredictionForm, PredictionResult, Season};
    use axum::{http::StatusCode as AxumStatus, routing::post, Json, Router};

    fn sample_request() -> PredictionRequest {
        PredictionForm {
            district: Some(District::Khordha),
            crop: Some(Crop::Paddy),
            season: Some(Season::Kharif),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> PredictionClient {
        PredictionClient::new(ApiConfig { base_url })
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = client_for("http://127.0.0.1:8000/".into());
        assert_eq!(client.endpoint(), "http://127.0.0.1:8000/predict");
    }

    #[test]
    fn error_message_prefers_detail() {
        let status = StatusCode::UNPROCESSABLE_ENTITY;
        assert_eq!(error_message(status, r#"{"detail":"bad input"}"#), "bad input");
        assert_eq!(
            error_message(status, r#"{"detail":"", "error":"model offline"}"#),
            "model offline"
        );
        assert_eq!(
            error_message(status, r#"{"detail":[{"loc":["soil_n"]}]}"#),
            r#"[{"loc":["soil_n"]}]"#
        );
    }

    #[test]
    fn error_message_falls_back_to_json_text() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"code":7}"#),
            r#"{"code":7}"#
        );
    }

    #[test]
    fn error_message_non_json() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream timed out"),
            "upstream timed out"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }

    #[tokio::test]
    async fn predict_success_nested_result() {
        let router = Router::new().route(
            "/predict",
            post(|Json(body): Json<Value>| async move {
                // echo the district back so the wire shape is checked too
                let district = body["district"].as_str().unwrap_or("?").to_string();
                Json(serde_json::json!({
                    "result": {
                        "predicted_yield": 36.2,
                        "units": "q_per_ha",
                        "recommendations": [format!("Plan for {}", district)],
                    }
                }))
            }),
        );
        let client = client_for(serve(router).await);

        let outcome = client.predict(&sample_request()).await.unwrap();
        let result = PredictionResult::from_outcome(&outcome);
        assert_eq!(result.predicted_yield, Some(36.2));
        assert_eq!(result.recommendations, vec!["Plan for Khordha"]);
    }

    #[tokio::test]
    async fn predict_error_detail_becomes_message() {
        let router = Router::new().route(
            "/predict",
            post(|| async {
                (
                    AxumStatus::UNPROCESSABLE_ENTITY,
                    Json(serde_json::json!({ "detail": "bad input" })),
                )
            }),
        );
        let client = client_for(serve(router).await);

        let err = client.predict(&sample_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "bad input");
        assert!(matches!(err, KrishiMitraError::Prediction { status: 422, .. }));
    }

    #[tokio::test]
    async fn predict_plain_text_error() {
        let router = Router::new().route(
            "/predict",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "model crashed") }),
        );
        let client = client_for(serve(router).await);

        let err = client.predict(&sample_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "model crashed");
    }

    // Lenient on purpose for now: a 200 with a non-JSON body is not an error.
    // If the backend contract tightens, this is the test to flip.
    #[tokio::test]
    async fn predict_non_json_success_is_raw() {
        let router = Router::new().route("/predict", post(|| async { "ok but not json" }));
        let client = client_for(serve(router).await);

        let outcome = client.predict(&sample_request()).await.unwrap();
        assert_eq!(outcome, PredictionOutcome::Raw("ok but not json".into()));
    }

    #[tokio::test]
    async fn unreachable_service() {
        // bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));
        let err = client.predict(&sample_request()).await.unwrap_err();
        assert!(matches!(err, KrishiMitraError::ServiceUnavailable(_)));
        assert!(!client.test_connection().await.unwrap());
    }
}
