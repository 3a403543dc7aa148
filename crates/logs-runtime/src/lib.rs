//! Runtime layer for lambda-logs.
//!
//! Connects log retrieval (CloudWatch Logs or an exported file) to the
//! parsing pipeline and fans finished summaries out to observers.

pub mod parser;
pub mod source;

pub use logs_core as core;
pub use logs_data as data;
