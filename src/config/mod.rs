use serde::Deserialize;
use std::time::Duration;

use crate::services::poller::PollPolicy;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// PostgreSQL connection string for the license store
    pub database_url: String,

    /// Upper bound on pooled license store connections
    #[serde(default = "default_database_max_connections")]
    pub database_max_connections: u32,

    /// Replicate API token, sent as `Authorization: Token <token>`
    pub replicate_api_token: String,

    #[serde(default = "default_replicate_base_url")]
    pub replicate_base_url: String,

    /// Model version hash used for image enhancement predictions
    #[serde(default = "default_replicate_model_version")]
    pub replicate_model_version: String,

    /// OpenAI API key for the chat completion service
    pub openai_api_key: String,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Maximum number of status polls per enhancement job
    #[serde(default = "default_enhance_max_attempts")]
    pub enhance_max_attempts: u32,

    /// Pause between two status polls, in milliseconds
    #[serde(default = "default_enhance_poll_interval_ms")]
    pub enhance_poll_interval_ms: u64,

    /// Maximum accepted request body size (images arrive base64-encoded)
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_database_max_connections() -> u32 {
    5
}

fn default_replicate_base_url() -> String {
    "https://api.replicate.com".to_string()
}

fn default_replicate_model_version() -> String {
    "fb8af171cfa1616ddcf1242c093f9c46bcada5ad4cf6f2fbe8b81b330ec5c003".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_enhance_max_attempts() -> u32 {
    20
}

fn default_enhance_poll_interval_ms() -> u64 {
    1500
}

fn default_body_limit_bytes() -> usize {
    10 * 1024 * 1024
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Poll budget and cadence for the enhance operation.
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(
            self.enhance_max_attempts,
            Duration::from_millis(self.enhance_poll_interval_ms),
        )
    }
}
