pub mod api;
pub mod license;
pub mod prediction;
