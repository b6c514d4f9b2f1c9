use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use snapbright::app_state::AppState;
use snapbright::config::AppConfig;
use snapbright::db;
use snapbright::routes;
use snapbright::services::{
    completion::OpenAiClient, license_store::PgLicenseStore, predictor::ReplicateClient,
};

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing snapbright server");

    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);
    routes::metrics::describe_metrics();

    tracing::info!("Connecting to PostgreSQL license store");
    let db_pool = db::init_pool(&config.database_url, config.database_max_connections)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Running database migrations");
    db::run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let licenses = Arc::new(PgLicenseStore::new(db_pool.clone()));
    let predictor = Arc::new(ReplicateClient::new(
        &config.replicate_base_url,
        &config.replicate_api_token,
    ));
    let completion = Arc::new(OpenAiClient::new(
        &config.openai_base_url,
        &config.openai_api_key,
        &config.openai_model,
    ));

    let poll_policy = config.poll_policy();
    tracing::info!(
        max_attempts = poll_policy.max_attempts(),
        interval_ms = poll_policy.interval().as_millis() as u64,
        max_wait_ms = poll_policy.max_wait().as_millis() as u64,
        "Enhancement poll policy"
    );

    let state = AppState::new(
        licenses,
        predictor,
        completion,
        poll_policy,
        config.replicate_model_version.clone(),
    )
    .with_db(db_pool);

    let app = routes::router(state, Some(prometheus_handle), config.body_limit_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
