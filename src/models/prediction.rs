use serde::{Deserialize, Serialize};
use strum::Display;

/// Status reported by the prediction service for a job.
///
/// Only `Succeeded` and `Failed` end polling. Anything else, including
/// values this enum does not know about, means the job is still running.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

/// Body sent when creating a prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub version: String,
    pub input: PredictionInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionInput {
    /// Image as a data URI or a publicly reachable URL.
    pub image: String,
}

/// Prediction as returned by the create and get endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}
