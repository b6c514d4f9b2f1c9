use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::models::prediction::{Prediction, PredictionRequest};

/// Asynchronous prediction service: create a job, then query it by id.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Create a prediction and return its job id.
    async fn submit(&self, request: &PredictionRequest) -> Result<String, PredictorError>;

    /// Fetch the current state of a prediction.
    async fn get(&self, job_id: &str) -> Result<Prediction, PredictorError>;
}

/// Create response; only the id is needed to start polling.
#[derive(Deserialize)]
struct CreatedPrediction {
    id: String,
}

/// Client for the Replicate predictions API.
pub struct ReplicateClient {
    http: Client,
    base_url: String,
    api_token: String,
}

impl ReplicateClient {
    pub fn new(base_url: &str, api_token: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Token {}", self.api_token)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PredictorError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PredictorError::Status { status, body });
        }
        response.json::<T>().await.map_err(PredictorError::Decode)
    }
}

#[async_trait]
impl Predictor for ReplicateClient {
    async fn submit(&self, request: &PredictionRequest) -> Result<String, PredictorError> {
        let url = format!("{}/v1/predictions", self.base_url);

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(request)
            .send()
            .await
            .map_err(PredictorError::Http)?;

        let created: CreatedPrediction = Self::read_json(response).await?;
        Ok(created.id)
    }

    async fn get(&self, job_id: &str) -> Result<Prediction, PredictorError> {
        let url = format!("{}/v1/predictions/{}", self.base_url, job_id);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await
            .map_err(PredictorError::Http)?;

        Self::read_json(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("Prediction service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode prediction response: {0}")]
    Decode(reqwest::Error),
}
