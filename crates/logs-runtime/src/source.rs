//! Log-event retrieval.
//!
//! A [`LogEventSource`] returns the complete, chronologically ordered batch of
//! events for one log stream. Retrieval is a single call: no pagination and
//! no retry happen here, and failures surface as
//! [`LambdaLogError::Retrieval`] without interpretation.

use std::future::Future;
use std::path::PathBuf;

use aws_sdk_cloudwatchlogs::config::Region;
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_sdk_cloudwatchlogs::Client;
use logs_core::error::{LambdaLogError, Result};
use logs_core::models::RawLogRecord;

// ── LogEventSource ────────────────────────────────────────────────────────────

/// Anything that can hand over the events of one log stream.
pub trait LogEventSource {
    fn fetch_events(
        &self,
        log_group: &str,
        log_stream: &str,
    ) -> impl Future<Output = Result<Vec<RawLogRecord>>> + Send;
}

// ── CloudWatchSource ──────────────────────────────────────────────────────────

/// Reads a log stream with one CloudWatch Logs `GetLogEvents` call.
#[derive(Debug, Clone)]
pub struct CloudWatchSource {
    client: Client,
}

impl CloudWatchSource {
    /// Wrap an already configured client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the standard AWS environment (credentials chain,
    /// shared config), optionally pinning the region and profile.
    pub async fn from_env(region: Option<&str>, profile: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;

        tracing::debug!(
            region = config.region().map(|r| r.as_ref()).unwrap_or("<unset>"),
            "CloudWatch Logs client configured"
        );
        Self::new(Client::new(&config))
    }
}

impl LogEventSource for CloudWatchSource {
    async fn fetch_events(&self, log_group: &str, log_stream: &str) -> Result<Vec<RawLogRecord>> {
        let output = self
            .client
            .get_log_events()
            .log_group_name(log_group)
            .log_stream_name(log_stream)
            .start_from_head(true)
            .send()
            .await
            .map_err(|e| {
                LambdaLogError::retrieval(log_group, log_stream, DisplayErrorContext(&e).to_string())
            })?;

        let events: Vec<RawLogRecord> = output
            .events()
            .iter()
            .filter_map(|event| match (event.timestamp(), event.message()) {
                (Some(timestamp), Some(message)) => Some(RawLogRecord::new(timestamp, message)),
                _ => None,
            })
            .collect();

        tracing::debug!(
            log_group,
            log_stream,
            received = output.events().len(),
            kept = events.len(),
            "fetched log events"
        );
        Ok(events)
    }
}

// ── FileSource ────────────────────────────────────────────────────────────────

/// Serves events from an exported JSON file instead of the remote store.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogEventSource for FileSource {
    /// The group and stream names only label errors; the file holds one stream.
    async fn fetch_events(&self, log_group: &str, log_stream: &str) -> Result<Vec<RawLogRecord>> {
        logs_data::reader::load_events(&self.path)
            .map_err(|e| LambdaLogError::retrieval(log_group, log_stream, e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
