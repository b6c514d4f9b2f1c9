use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

pub mod enhance;
pub mod health;
pub mod license;
pub mod metrics;
pub mod tags;

/// Build the API router with its middleware stack.
///
/// `/metrics` is mounted only when a Prometheus handle is supplied.
pub fn router(
    state: AppState,
    prometheus: Option<Arc<PrometheusHandle>>,
    body_limit_bytes: usize,
) -> Router {
    let mut app = Router::new()
        .route("/health", get(health::health_check))
        .route("/enhance", post(enhance::enhance_image))
        .route("/tags", post(tags::generate_tags))
        .route("/activate", post(license::activate_license))
        .route("/verify", post(license::verify_license))
        .with_state(state);

    if let Some(handle) = prometheus {
        app = app.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(handle),
        );
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
}
