use axum::extract::State;
use garde::Validate;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::extractors::Json;
use crate::models::api::{EnhanceRequest, EnhanceResponse};
use crate::models::prediction::{PredictionInput, PredictionRequest};
use crate::services::license_gate::Licensed;

/// POST /enhance — run the image through the enhancement model and wait for it.
pub async fn enhance_image(
    _license: Licensed,
    State(state): State<AppState>,
    Json(body): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, ApiError> {
    body.validate()
        .map_err(|_| ApiError::Validation("Image is required".to_string()))?;

    let request = PredictionRequest {
        version: state.model_version.clone(),
        input: PredictionInput { image: body.image },
    };

    match state.poller.run(&request, &state.poll_policy).await {
        Ok(outcome) => Ok(Json(EnhanceResponse {
            enhanced_image: outcome.output,
        })),
        Err(e) => {
            tracing::error!(outcome = e.kind(), error = %e, "Image enhancement failed");
            Err(ApiError::ProcessingFailed("Failed to process image"))
        }
    }
}
