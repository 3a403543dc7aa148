use serde::{Deserialize, Serialize};

/// One event as delivered by the log store, in stream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLogRecord {
    /// Event timestamp in epoch milliseconds.
    pub timestamp: i64,
    /// Raw message text, possibly with trailing newline.
    pub message: String,
}

impl RawLogRecord {
    pub fn new(timestamp: i64, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }
}

/// Kind tag carried by every [`LogLine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    #[default]
    Log,
}

/// A free-text line written by the function during the invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    /// Invocation (request) id the line was tagged with.
    pub invocation_id: String,
    #[serde(default)]
    pub kind: LineKind,
    /// Timestamp of the raw event, epoch milliseconds.
    pub time: i64,
    /// Payload after the second tab.
    pub data: String,
}

/// Timing, memory and cost figures for one invocation.
///
/// Every field stays `None` until the marker that carries it is seen for the
/// target invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Invocation id; empty until a matching marker was seen.
    #[serde(default)]
    pub invocation_id: String,
    /// Function version announced on the START line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Timestamp of the START marker.
    pub start_time: Option<i64>,
    /// Timestamp of the END marker.
    pub end_time: Option<i64>,
    /// Timestamp of the committed REPORT line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_time: Option<i64>,
    /// Measured duration from the REPORT line, fractional milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    /// Cold-start initialisation time, fractional milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_duration_ms: Option<f64>,
    pub billed_duration_ms: Option<u64>,
    pub memory_size_mb: Option<u64>,
    pub max_memory_used_mb: Option<u64>,
    /// Compute cost; only set when billed duration and memory size parsed.
    pub cost: Option<f64>,
}

impl UsageRecord {
    /// Wall-clock milliseconds between the START and END markers.
    pub fn elapsed_ms(&self) -> Option<i64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Share of the configured memory that the invocation peaked at, in percent.
    pub fn memory_utilisation(&self) -> Option<f64> {
        match (self.max_memory_used_mb, self.memory_size_mb) {
            (Some(used), Some(size)) if size > 0 => Some(used as f64 / size as f64 * 100.0),
            _ => None,
        }
    }
}

/// The result of parsing one log stream for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationSummary {
    pub usage: UsageRecord,
    pub logs: Vec<LogLine>,
}

impl InvocationSummary {
    /// `true` when nothing in the stream matched the target invocation.
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty() && self.usage.invocation_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_requires_both_markers() {
        let mut usage = UsageRecord {
            start_time: Some(1_000),
            ..Default::default()
        };
        assert_eq!(usage.elapsed_ms(), None);

        usage.end_time = Some(1_250);
        assert_eq!(usage.elapsed_ms(), Some(250));
    }

    #[test]
    fn test_memory_utilisation() {
        let usage = UsageRecord {
            memory_size_mb: Some(128),
            max_memory_used_mb: Some(64),
            ..Default::default()
        };
        let pct = usage.memory_utilisation().unwrap();
        assert!((pct - 50.0).abs() < 1e-9, "utilisation = {pct}");
    }

    #[test]
    fn test_memory_utilisation_zero_size() {
        let usage = UsageRecord {
            memory_size_mb: Some(0),
            max_memory_used_mb: Some(64),
            ..Default::default()
        };
        assert!(usage.memory_utilisation().is_none());
    }

    #[test]
    fn test_default_summary_is_empty() {
        assert!(InvocationSummary::default().is_empty());
    }

    #[test]
    fn test_summary_with_usage_is_not_empty() {
        let summary = InvocationSummary {
            usage: UsageRecord {
                invocation_id: "abc123".to_string(),
                ..Default::default()
            },
            logs: Vec::new(),
        };
        assert!(!summary.is_empty());
    }

    #[test]
    fn test_log_line_serialises_kind_lowercase() {
        let line = LogLine {
            invocation_id: "abc123".to_string(),
            kind: LineKind::Log,
            time: 42,
            data: "hello".to_string(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["kind"], "log");
        assert_eq!(json["time"], 42);
    }

    #[test]
    fn test_raw_record_ignores_ingestion_time() {
        let raw: RawLogRecord = serde_json::from_str(
            r#"{"timestamp": 1700000000000, "message": "START RequestId: a", "ingestionTime": 1700000000100}"#,
        )
        .unwrap();
        assert_eq!(raw, RawLogRecord::new(1_700_000_000_000, "START RequestId: a"));
    }
}
