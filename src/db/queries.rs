use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::str::FromStr;

use crate::models::license::{LicenseRecord, LicenseStatus, NewLicense};

fn license_from_row(row: &PgRow) -> Result<LicenseRecord, sqlx::Error> {
    let status_str: String = row.try_get("status")?;
    let status = LicenseStatus::from_str(&status_str).unwrap_or(LicenseStatus::Inactive);

    Ok(LicenseRecord {
        id: row.try_get("id")?,
        license_key: row.try_get("license_key")?,
        email: row.try_get("email")?,
        stripe_customer_id: row.try_get("stripe_customer_id")?,
        status,
        created_at: row.try_get("created_at")?,
    })
}

/// Fetch all licenses with the given key and status
pub async fn find_licenses(
    pool: &PgPool,
    license_key: &str,
    status: LicenseStatus,
) -> Result<Vec<LicenseRecord>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, license_key, email, stripe_customer_id, status, created_at
        FROM license
        WHERE license_key = $1 AND status = $2
        "#,
    )
    .bind(license_key)
    .bind(status.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(license_from_row).collect()
}

/// Insert a new active license
pub async fn insert_license(
    pool: &PgPool,
    license: &NewLicense,
) -> Result<LicenseRecord, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO license (license_key, email, stripe_customer_id, status)
        VALUES ($1, $2, $3, $4)
        RETURNING id, license_key, email, stripe_customer_id, status, created_at
        "#,
    )
    .bind(&license.license_key)
    .bind(&license.email)
    .bind(&license.stripe_customer_id)
    .bind(LicenseStatus::Active.to_string())
    .fetch_one(pool)
    .await?;

    license_from_row(&row)
}

/// Round-trip to the database (for health checks)
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
