//! SnapBright API
//!
//! License-gated HTTP service that enhances product images through an
//! asynchronous prediction service and generates product tags through a
//! text completion service.

pub mod app_state;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod models;
pub mod routes;
pub mod services;
