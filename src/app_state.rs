use sqlx::PgPool;
use std::sync::Arc;

use crate::services::{
    completion::CompletionService,
    license_gate::LicenseGate,
    license_store::LicenseStore,
    poller::{JobPoller, PollPolicy},
    predictor::Predictor,
};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub licenses: Arc<dyn LicenseStore>,
    pub gate: LicenseGate,
    pub poller: JobPoller,
    pub completion: Arc<dyn CompletionService>,
    pub poll_policy: PollPolicy,
    pub model_version: String,
    /// Present when backed by PostgreSQL; used by the health check.
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(
        licenses: Arc<dyn LicenseStore>,
        predictor: Arc<dyn Predictor>,
        completion: Arc<dyn CompletionService>,
        poll_policy: PollPolicy,
        model_version: impl Into<String>,
    ) -> Self {
        Self {
            gate: LicenseGate::new(licenses.clone()),
            licenses,
            poller: JobPoller::new(predictor),
            completion,
            poll_policy,
            model_version: model_version.into(),
            db: None,
        }
    }

    pub fn with_db(mut self, db: PgPool) -> Self {
        self.db = Some(db);
        self
    }
}
