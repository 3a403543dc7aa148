//! Shared domain types for lambda-logs.
//!
//! Holds the invocation data model, the GB-second cost calculator, the error
//! taxonomy, CLI settings and the formatting / timezone helpers used when
//! rendering a summary.

pub mod error;
pub mod formatting;
pub mod models;
pub mod pricing;
pub mod settings;
pub mod time_utils;

pub use error::{LambdaLogError, Result};
