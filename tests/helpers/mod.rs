//! In-memory collaborators and request helpers for router tests

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

use snapbright::app_state::AppState;
use snapbright::models::license::{LicenseRecord, LicenseStatus, NewLicense};
use snapbright::models::prediction::{Prediction, PredictionRequest, PredictionStatus};
use snapbright::routes;
use snapbright::services::completion::{CompletionError, CompletionService};
use snapbright::services::license_store::{LicenseStore, StoreError};
use snapbright::services::poller::PollPolicy;
use snapbright::services::predictor::{Predictor, PredictorError};

pub const ACTIVE_KEY: &str = "LK-ACTIVE-0001";
pub const INACTIVE_KEY: &str = "LK-INACTIVE-0002";
pub const MODEL_VERSION: &str = "test-model-version";

/// License store backed by a vector.
#[derive(Default)]
pub struct InMemoryLicenseStore {
    pub records: Mutex<Vec<LicenseRecord>>,
    pub fail: bool,
    pub lookups: AtomicUsize,
}

impl InMemoryLicenseStore {
    pub fn seeded() -> Self {
        let store = Self::default();
        store.push(ACTIVE_KEY, LicenseStatus::Active);
        store.push(INACTIVE_KEY, LicenseStatus::Inactive);
        store
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn push(&self, key: &str, status: LicenseStatus) {
        self.records.lock().unwrap().push(LicenseRecord {
            id: uuid::Uuid::new_v4(),
            license_key: key.to_string(),
            email: "owner@example.com".to_string(),
            stripe_customer_id: "cus_test".to_string(),
            status,
            created_at: chrono::Utc::now(),
        });
    }

    pub fn records(&self) -> Vec<LicenseRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl LicenseStore for InMemoryLicenseStore {
    async fn find_active(&self, license_key: &str) -> Result<Vec<LicenseRecord>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.license_key == license_key && r.status == LicenseStatus::Active)
            .cloned()
            .collect())
    }

    async fn insert(&self, license: NewLicense) -> Result<LicenseRecord, StoreError> {
        if self.fail {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.license_key == license.license_key) {
            return Err(StoreError::DuplicateKey);
        }
        let record = LicenseRecord {
            id: uuid::Uuid::new_v4(),
            license_key: license.license_key,
            email: license.email,
            stripe_customer_id: license.stripe_customer_id,
            status: LicenseStatus::Active,
            created_at: chrono::Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }
}

/// Predictor that replays a fixed sequence of statuses.
#[derive(Default)]
pub struct ScriptedPredictor {
    pub statuses: Mutex<VecDeque<(PredictionStatus, Option<serde_json::Value>)>>,
    pub submit_fails: bool,
    pub submitted: Mutex<Vec<PredictionRequest>>,
    pub polls: AtomicUsize,
}

impl ScriptedPredictor {
    pub fn new(statuses: Vec<(PredictionStatus, Option<serde_json::Value>)>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            ..Self::default()
        }
    }

    pub fn submissions(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Predictor for ScriptedPredictor {
    async fn submit(&self, request: &PredictionRequest) -> Result<String, PredictorError> {
        self.submitted.lock().unwrap().push(request.clone());
        if self.submit_fails {
            return Err(PredictorError::Status {
                status: reqwest::StatusCode::UNPROCESSABLE_ENTITY,
                body: "invalid version".to_string(),
            });
        }
        Ok("pred-123".to_string())
    }

    async fn get(&self, job_id: &str) -> Result<Prediction, PredictorError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let (status, output) = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((PredictionStatus::Processing, None));
        Ok(Prediction {
            id: job_id.to_string(),
            status,
            output,
            error: None,
        })
    }
}

/// Completion service that records prompts and echoes a canned reply.
#[derive(Default)]
pub struct RecordingCompletion {
    pub prompts: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingCompletion {
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for RecordingCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(CompletionError::EmptyResponse);
        }
        Ok("tags: mug, ceramic".to_string())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryLicenseStore>,
    pub predictor: Arc<ScriptedPredictor>,
    pub completion: Arc<RecordingCompletion>,
}

impl TestApp {
    pub fn new(
        store: InMemoryLicenseStore,
        predictor: ScriptedPredictor,
        completion: RecordingCompletion,
        max_attempts: u32,
    ) -> Self {
        let store = Arc::new(store);
        let predictor = Arc::new(predictor);
        let completion = Arc::new(completion);

        // Local recorder; nothing is installed globally
        let prometheus = PrometheusBuilder::new().build_recorder().handle();

        let state = AppState::new(
            store.clone(),
            predictor.clone(),
            completion.clone(),
            PollPolicy::new(max_attempts, Duration::from_millis(1500)),
            MODEL_VERSION,
        );

        Self {
            router: routes::router(state, Some(Arc::new(prometheus)), 1024 * 1024),
            store,
            predictor,
            completion,
        }
    }

    pub fn with_predictor(predictor: ScriptedPredictor, max_attempts: u32) -> Self {
        Self::new(
            InMemoryLicenseStore::seeded(),
            predictor,
            RecordingCompletion::default(),
            max_attempts,
        )
    }

    pub fn seeded() -> Self {
        Self::with_predictor(ScriptedPredictor::default(), 3)
    }

    /// POST a JSON body, optionally with a license header.
    pub async fn post(
        &self,
        path: &str,
        license_key: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.post_raw(path, license_key, Some("application/json"), body.to_string())
            .await
    }

    /// POST an arbitrary body with an optional content type.
    pub async fn post_raw(
        &self,
        path: &str,
        license_key: Option<&str>,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("POST").uri(path);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        if let Some(key) = license_key {
            builder = builder.header("x-license-key", key);
        }
        let request = builder.body(body.into()).expect("valid request");

        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let (status, text) = self.get_text(path).await;
        (status, serde_json::from_str(&text).unwrap_or(serde_json::Value::Null))
    }

    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("valid request");
        let (status, bytes) = self.send_bytes(request).await;
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let (status, bytes) = self.send_bytes(request).await;
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    async fn send_bytes(&self, request: Request<Body>) -> (StatusCode, axum::body::Bytes) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        (status, bytes)
    }
}
