use garde::Validate;
use serde::{Deserialize, Serialize};

/// POST /enhance request body.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EnhanceRequest {
    #[serde(default)]
    #[garde(length(min = 1))]
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub enhanced_image: serde_json::Value,
}

/// POST /tags request body.
#[derive(Debug, Default, Deserialize)]
pub struct TagsRequest {
    #[serde(default)]
    pub product_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub result: String,
}

/// POST /activate request body. Absent fields deserialize empty and fail
/// validation.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivateRequest {
    #[garde(length(min = 1, max = 320))]
    pub email: String,

    #[garde(length(min = 1, max = 200))]
    pub license_key: String,

    #[serde(alias = "billingCustomerId")]
    #[garde(length(min = 1, max = 200))]
    pub stripe_customer_id: String,
}

#[derive(Debug, Serialize)]
pub struct ActivateResponse {
    pub success: bool,
}

/// POST /verify request body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    #[serde(default)]
    pub license_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
}
