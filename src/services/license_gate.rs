use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::services::license_store::LicenseStore;

/// Header carrying the license key on protected requests.
pub const LICENSE_HEADER: &str = "x-license-key";

/// Outcome of a license check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    Unauthorized(Denial),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No credential was presented; the store was not queried.
    Missing,
    /// Unknown, inactive, or the store could not answer.
    Invalid,
}

impl Authorization {
    pub fn is_authorized(self) -> bool {
        matches!(self, Authorization::Authorized)
    }
}

/// Checks a credential against the license store.
#[derive(Clone)]
pub struct LicenseGate {
    store: Arc<dyn LicenseStore>,
}

impl LicenseGate {
    pub fn new(store: Arc<dyn LicenseStore>) -> Self {
        Self { store }
    }

    pub async fn authorize(&self, credential: Option<&str>) -> Authorization {
        let key = match credential {
            Some(key) if !key.is_empty() => key,
            _ => {
                metrics::counter!("license_checks_total", "outcome" => "unauthorized").increment(1);
                return Authorization::Unauthorized(Denial::Missing);
            }
        };

        let decision = match self.store.find_active(key).await {
            Ok(records) if !records.is_empty() => Authorization::Authorized,
            Ok(_) => Authorization::Unauthorized(Denial::Invalid),
            Err(e) => {
                tracing::warn!(error = %e, "License lookup failed, denying request");
                Authorization::Unauthorized(Denial::Invalid)
            }
        };

        let outcome = if decision.is_authorized() {
            "authorized"
        } else {
            "unauthorized"
        };
        metrics::counter!("license_checks_total", "outcome" => outcome).increment(1);

        decision
    }
}

/// Extractor proving the request carried an active license key.
///
/// Handlers that take `Licensed` never run for unauthorized requests, and
/// since it is a parts extractor it resolves before the body is read.
#[derive(Debug, Clone, Copy)]
pub struct Licensed;

impl FromRequestParts<AppState> for Licensed {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(LICENSE_HEADER)
            .and_then(|value| value.to_str().ok());

        match state.gate.authorize(credential).await {
            Authorization::Authorized => Ok(Licensed),
            Authorization::Unauthorized(Denial::Missing) => Err(ApiError::MissingLicense),
            Authorization::Unauthorized(Denial::Invalid) => Err(ApiError::InvalidLicense),
        }
    }
}
