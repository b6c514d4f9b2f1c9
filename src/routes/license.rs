use axum::extract::State;
use garde::Validate;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::extractors::Json;
use crate::models::api::{ActivateRequest, ActivateResponse, VerifyRequest, VerifyResponse};
use crate::models::license::NewLicense;
use crate::services::license_gate::Authorization;

/// POST /activate — record a new active license.
pub async fn activate_license(
    State(state): State<AppState>,
    Json(body): Json<ActivateRequest>,
) -> Result<Json<ActivateResponse>, ApiError> {
    body.validate()
        .map_err(|report| ApiError::Validation(format!("Invalid activation request: {report}")))?;

    let license = NewLicense {
        license_key: body.license_key,
        email: body.email,
        stripe_customer_id: body.stripe_customer_id,
    };

    match state.licenses.insert(license).await {
        Ok(record) => {
            tracing::info!(license_id = %record.id, "License activated");
            Ok(Json(ActivateResponse { success: true }))
        }
        Err(e) => {
            tracing::error!(error = %e, "License activation failed");
            Err(ApiError::ProcessingFailed("Activation failed"))
        }
    }
}

/// POST /verify — report whether a license key is active.
pub async fn verify_license(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    match state.gate.authorize(body.license_key.as_deref()).await {
        Authorization::Authorized => Ok(Json(VerifyResponse { valid: true })),
        Authorization::Unauthorized(_) => Err(ApiError::LicenseNotValid),
    }
}
