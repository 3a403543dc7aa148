//! Log-stream parsing for lambda-logs.
//!
//! Classifies raw CloudWatch lines, folds them into a per-invocation summary
//! and loads exported event files from disk.

pub mod aggregator;
pub mod classifier;
pub mod reader;

pub use aggregator::{parse, InvocationAggregator, ParseStats};
pub use logs_core as core;
