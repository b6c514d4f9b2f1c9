use axum::extract::State;
use crate::extractors::Json;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::models::api::{TagsRequest, TagsResponse};
use crate::services::completion::tag_prompt;
use crate::services::license_gate::Licensed;

/// POST /tags — generate SEO tags and a description for a product.
pub async fn generate_tags(
    _license: Licensed,
    State(state): State<AppState>,
    Json(body): Json<TagsRequest>,
) -> Result<Json<TagsResponse>, ApiError> {
    let prompt = tag_prompt(body.product_name.as_deref());

    match state.completion.complete(&prompt).await {
        Ok(result) => {
            metrics::counter!("tag_generations_total", "outcome" => "ok").increment(1);
            Ok(Json(TagsResponse { result }))
        }
        Err(e) => {
            metrics::counter!("tag_generations_total", "outcome" => "error").increment(1);
            tracing::error!(error = %e, "Tag generation failed");
            Err(ApiError::ProcessingFailed("Failed to generate tags"))
        }
    }
}
