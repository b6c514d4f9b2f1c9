use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::queries;
use crate::models::license::{LicenseRecord, LicenseStatus, NewLicense};

/// Keyed store of license records.
#[async_trait]
pub trait LicenseStore: Send + Sync {
    /// All records whose key matches exactly and whose status is active.
    async fn find_active(&self, license_key: &str) -> Result<Vec<LicenseRecord>, StoreError>;

    /// Create an active license. Keys are unique.
    async fn insert(&self, license: NewLicense) -> Result<LicenseRecord, StoreError>;
}

/// PostgreSQL-backed license store.
pub struct PgLicenseStore {
    pool: PgPool,
}

impl PgLicenseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LicenseStore for PgLicenseStore {
    async fn find_active(&self, license_key: &str) -> Result<Vec<LicenseRecord>, StoreError> {
        let records = queries::find_licenses(&self.pool, license_key, LicenseStatus::Active).await?;
        Ok(records)
    }

    async fn insert(&self, license: NewLicense) -> Result<LicenseRecord, StoreError> {
        queries::insert_license(&self.pool, &license)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::DuplicateKey
                }
                other => StoreError::Database(other),
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("License key already exists")]
    DuplicateKey,
}
