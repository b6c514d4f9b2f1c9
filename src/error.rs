use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced at the HTTP boundary.
///
/// Upstream failures are collapsed into `ProcessingFailed`; the specific
/// cause is logged by the handler before conversion.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing license key")]
    MissingLicense,

    #[error("Invalid or inactive license")]
    InvalidLicense,

    #[error("Invalid license")]
    LicenseNotValid,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    ProcessingFailed(&'static str),

    /// Body could not be read (e.g. over the size limit).
    #[error("{1}")]
    Rejected(StatusCode, String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingLicense => StatusCode::UNAUTHORIZED,
            ApiError::InvalidLicense | ApiError::LicenseNotValid => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ProcessingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected(status, _) => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
