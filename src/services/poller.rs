//! Submit-then-poll driver for prediction jobs.
//!
//! A job is submitted once, then polled up to `max_attempts` times with a
//! fixed pause between polls. Every run ends in exactly one of: output
//! captured, service-reported failure, attempts exhausted, or a transport
//! error. Submission is never retried.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::models::prediction::{PredictionRequest, PredictionStatus};
use crate::services::predictor::{Predictor, PredictorError};

/// Poll budget and cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    max_attempts: u32,
    interval: Duration,
}

impl PollPolicy {
    /// `max_attempts` is clamped to at least one poll.
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Upper bound on time spent pausing between polls.
    pub fn max_wait(&self) -> Duration {
        self.interval * (self.max_attempts - 1)
    }
}

/// A job that reached the success sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    pub job_id: String,
    pub output: serde_json::Value,
    pub attempts: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Prediction transport error: {source}")]
    Transport {
        job_id: Option<String>,
        #[source]
        source: PredictorError,
    },

    #[error("Prediction {job_id} failed: {detail}")]
    Failed {
        job_id: String,
        detail: String,
        attempts: u32,
    },

    #[error("Prediction {job_id} did not finish after {attempts} polls")]
    TimedOut { job_id: String, attempts: u32 },
}

impl PollError {
    /// Outcome label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Transport { .. } => "transport_error",
            PollError::Failed { .. } => "failed",
            PollError::TimedOut { .. } => "timed_out",
        }
    }
}

/// Drives one prediction job to a terminal outcome.
#[derive(Clone)]
pub struct JobPoller {
    predictor: Arc<dyn Predictor>,
}

impl JobPoller {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self { predictor }
    }

    pub async fn run(
        &self,
        request: &PredictionRequest,
        policy: &PollPolicy,
    ) -> Result<PollOutcome, PollError> {
        let result = self.drive(request, policy).await;

        match &result {
            Ok(outcome) => {
                metrics::counter!("enhance_jobs_total", "outcome" => "succeeded").increment(1);
                metrics::histogram!("enhance_poll_attempts").record(outcome.attempts as f64);
                tracing::info!(
                    job_id = %outcome.job_id,
                    attempts = outcome.attempts,
                    "Prediction succeeded"
                );
            }
            Err(e) => {
                metrics::counter!("enhance_jobs_total", "outcome" => e.kind()).increment(1);
                match e {
                    PollError::Failed { attempts, .. } | PollError::TimedOut { attempts, .. } => {
                        metrics::histogram!("enhance_poll_attempts").record(*attempts as f64);
                    }
                    PollError::Transport { .. } => {}
                }
                tracing::warn!(outcome = e.kind(), error = %e, "Prediction did not succeed");
            }
        }

        result
    }

    async fn drive(
        &self,
        request: &PredictionRequest,
        policy: &PollPolicy,
    ) -> Result<PollOutcome, PollError> {
        let job_id = self
            .predictor
            .submit(request)
            .await
            .map_err(|source| PollError::Transport {
                job_id: None,
                source,
            })?;

        tracing::info!(job_id = %job_id, max_attempts = policy.max_attempts(), "Prediction submitted");

        for attempt in 1..=policy.max_attempts() {
            let prediction =
                self.predictor
                    .get(&job_id)
                    .await
                    .map_err(|source| PollError::Transport {
                        job_id: Some(job_id.clone()),
                        source,
                    })?;

            match prediction.status {
                PredictionStatus::Succeeded => {
                    return match prediction.output {
                        Some(output) if !output.is_null() => Ok(PollOutcome {
                            job_id,
                            output,
                            attempts: attempt,
                        }),
                        _ => Err(PollError::Failed {
                            job_id,
                            detail: "succeeded without output".to_string(),
                            attempts: attempt,
                        }),
                    };
                }
                PredictionStatus::Failed => {
                    let detail = prediction
                        .error
                        .map(|e| match e {
                            serde_json::Value::String(s) => s,
                            other => other.to_string(),
                        })
                        .unwrap_or_else(|| "no error detail".to_string());
                    return Err(PollError::Failed {
                        job_id,
                        detail,
                        attempts: attempt,
                    });
                }
                status => {
                    tracing::debug!(job_id = %job_id, attempt, %status, "Prediction still running");
                }
            }

            if attempt < policy.max_attempts() {
                sleep(policy.interval()).await;
            }
        }

        Err(PollError::TimedOut {
            job_id,
            attempts: policy.max_attempts(),
        })
    }
}
