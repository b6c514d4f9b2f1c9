use axum::extract::State;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Register descriptions for the metrics this service emits.
pub fn describe_metrics() {
    metrics::describe_counter!(
        "license_checks_total",
        "License checks performed, labelled by outcome"
    );
    metrics::describe_counter!(
        "enhance_jobs_total",
        "Image enhancement jobs, labelled by terminal outcome"
    );
    metrics::describe_histogram!(
        "enhance_poll_attempts",
        "Status polls used per enhancement job"
    );
    metrics::describe_counter!(
        "tag_generations_total",
        "Tag generation requests, labelled by outcome"
    );
}

/// GET /metrics — Prometheus text exposition.
pub async fn prometheus_metrics(State(handle): State<Arc<PrometheusHandle>>) -> impl IntoResponse {
    handle.render()
}
