//! Fetch-then-parse service.
//!
//! [`LogParser`] performs one retrieval through its [`LogEventSource`], folds
//! the batch into an [`InvocationSummary`] and then notifies every registered
//! [`LogDataObserver`] exactly once with the finished result.

use logs_core::error::Result;
use logs_core::models::{InvocationSummary, RawLogRecord};
use logs_core::pricing::CostCalculator;
use logs_data::aggregator::InvocationAggregator;
use tokio::sync::mpsc;

use crate::source::LogEventSource;

// ── Public types ──────────────────────────────────────────────────────────────

/// Which stream to read and, optionally, which invocation to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRequest {
    pub log_group: String,
    pub log_stream: String,
    /// When `None`, the first START marker in the stream decides.
    pub request_id: Option<String>,
}

impl LogRequest {
    pub fn new(log_group: impl Into<String>, log_stream: impl Into<String>) -> Self {
        Self {
            log_group: log_group.into(),
            log_stream: log_stream.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Receives every summary a [`LogParser`] produces.
pub trait LogDataObserver: Send + Sync {
    fn on_log_data(&self, summary: &InvocationSummary);
}

impl LogDataObserver for mpsc::UnboundedSender<InvocationSummary> {
    fn on_log_data(&self, summary: &InvocationSummary) {
        if self.send(summary.clone()).is_err() {
            tracing::debug!("log-data receiver dropped; summary not delivered");
        }
    }
}

// ── LogParser ─────────────────────────────────────────────────────────────────

/// Retrieves a log stream and summarises one invocation from it.
pub struct LogParser<S> {
    source: S,
    aggregator: InvocationAggregator,
    observers: Vec<Box<dyn LogDataObserver>>,
}

impl<S: LogEventSource> LogParser<S> {
    /// Create a parser that prices invocations with `calculator`.
    pub fn new(source: S, calculator: CostCalculator) -> Self {
        Self {
            source,
            aggregator: InvocationAggregator::new(calculator),
            observers: Vec::new(),
        }
    }

    /// Register an observer for future summaries.
    pub fn subscribe(&mut self, observer: impl LogDataObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Register a channel observer and return its receiving end.
    pub fn channel(&mut self) -> mpsc::UnboundedReceiver<InvocationSummary> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribe(tx);
        rx
    }

    /// Fetch the stream named by `request` and summarise it.
    ///
    /// Retrieval errors are returned unchanged; observers are not notified
    /// in that case.
    pub async fn get_log_data(&self, request: &LogRequest) -> Result<InvocationSummary> {
        let events = self
            .source
            .fetch_events(&request.log_group, &request.log_stream)
            .await?;

        tracing::info!(
            log_group = %request.log_group,
            log_stream = %request.log_stream,
            events = events.len(),
            "log events retrieved"
        );

        Ok(self.parse(&events, request.request_id.as_deref()))
    }

    /// Summarise an already fetched batch and notify observers.
    pub fn parse(&self, events: &[RawLogRecord], request_id: Option<&str>) -> InvocationSummary {
        let summary = self.aggregator.aggregate(events, request_id);

        if summary.is_empty() {
            tracing::warn!(
                request_id = request_id.unwrap_or("<first START>"),
                "no records matched the target invocation"
            );
        }

        for observer in &self.observers {
            observer.on_log_data(&summary);
        }
        summary
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
