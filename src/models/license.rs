use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Lifecycle status of a license. Only `Active` grants access.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, EnumString, Display, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    Active,
    Inactive,
}

/// A stored license row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseRecord {
    pub id: Uuid,
    pub license_key: String,
    pub email: String,
    pub stripe_customer_id: String,
    pub status: LicenseStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the activation operation.
#[derive(Debug, Clone)]
pub struct NewLicense {
    pub license_key: String,
    pub email: String,
    pub stripe_customer_id: String,
}
