//! Single-pass fold of a log stream into one [`InvocationSummary`].
//!
//! The target invocation id is either supplied by the caller or adopted from
//! the first START marker. Adoption happens during the pass, so records that
//! precede that marker are never matched.

use logs_core::models::{InvocationSummary, LineKind, LogLine, RawLogRecord, UsageRecord};
use logs_core::pricing::CostCalculator;
use tracing::debug;

use crate::classifier::{classify, LogRecord, ReportFields};

// ── ParseStats ────────────────────────────────────────────────────────────────

/// Per-kind counters collected while folding a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub records: usize,
    pub log_lines: usize,
    pub starts: usize,
    pub ends: usize,
    pub reports: usize,
    pub unknown: usize,
    /// Records of a recognised kind that belonged to another invocation.
    pub foreign: usize,
    /// REPORT values that were present but could not be parsed.
    pub malformed_fields: usize,
}

// ── FoldState ─────────────────────────────────────────────────────────────────

/// Accumulator threaded through the fold.
#[derive(Debug, Clone, Default)]
pub struct FoldState {
    target: Option<String>,
    summary: InvocationSummary,
    stats: ParseStats,
}

impl FoldState {
    /// Start a fold, optionally pinned to a caller-supplied invocation id.
    pub fn new(target: Option<&str>) -> Self {
        Self {
            target: target.map(str::to_string),
            ..Default::default()
        }
    }

    /// The invocation id currently matched against, if resolved.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    fn is_target(&self, invocation_id: &str) -> bool {
        self.target.as_deref() == Some(invocation_id)
    }

    /// Fold one raw record into the state.
    pub fn apply(mut self, record: &RawLogRecord) -> Self {
        self.stats.records += 1;
        let timestamp = record.timestamp;

        match classify(record.message.trim()) {
            LogRecord::Log {
                invocation_id,
                data,
            } => {
                self.stats.log_lines += 1;
                if self.is_target(invocation_id) {
                    self.summary.logs.push(LogLine {
                        invocation_id: invocation_id.to_string(),
                        kind: LineKind::Log,
                        time: timestamp,
                        data: data.to_string(),
                    });
                } else {
                    self.stats.foreign += 1;
                }
            }
            LogRecord::Start {
                invocation_id,
                version,
            } => {
                self.stats.starts += 1;
                if self.target.is_none() {
                    debug!(invocation_id, "resolved target invocation from START marker");
                    self.target = Some(invocation_id.to_string());
                }
                if self.is_target(invocation_id) {
                    let usage = &mut self.summary.usage;
                    usage.invocation_id = invocation_id.to_string();
                    usage.start_time = Some(timestamp);
                    usage.version = version.map(str::to_string);
                } else {
                    self.stats.foreign += 1;
                }
            }
            LogRecord::End { invocation_id } => {
                self.stats.ends += 1;
                if self.is_target(invocation_id) {
                    let usage = &mut self.summary.usage;
                    usage.invocation_id = invocation_id.to_string();
                    usage.end_time = Some(timestamp);
                } else {
                    self.stats.foreign += 1;
                }
            }
            LogRecord::Report(report) => {
                self.stats.reports += 1;
                self.stats.malformed_fields += report.malformed.len();
                for problem in &report.malformed {
                    debug!(timestamp, "{}", problem);
                }
                match report.invocation_id {
                    Some(id) if self.is_target(id) => {
                        apply_report(&mut self.summary.usage, &report, timestamp)
                    }
                    _ => self.stats.foreign += 1,
                }
            }
            LogRecord::Unknown => self.stats.unknown += 1,
        }

        self
    }

    /// Attach the cost and hand back the summary and counters.
    pub fn finish(mut self, calculator: &CostCalculator) -> (InvocationSummary, ParseStats) {
        self.summary.usage.cost = calculator.cost_for_usage(&self.summary.usage);
        (self.summary, self.stats)
    }
}

/// Overwrite the REPORT-derived fields; START/END times are kept.
fn apply_report(usage: &mut UsageRecord, report: &ReportFields<'_>, timestamp: i64) {
    if let Some(id) = report.invocation_id {
        usage.invocation_id = id.to_string();
    }
    usage.report_time = Some(timestamp);
    usage.duration_ms = report.duration_ms;
    usage.init_duration_ms = report.init_duration_ms;
    usage.billed_duration_ms = report.billed_duration_ms;
    usage.memory_size_mb = report.memory_size_mb;
    usage.max_memory_used_mb = report.max_memory_used_mb;
}

// ── InvocationAggregator ──────────────────────────────────────────────────────

/// Folds raw log records into an [`InvocationSummary`] and prices it.
#[derive(Debug, Clone, Default)]
pub struct InvocationAggregator {
    calculator: CostCalculator,
}

impl InvocationAggregator {
    pub fn new(calculator: CostCalculator) -> Self {
        Self { calculator }
    }

    /// Summarise `events` for `target`, or for the first START marker's
    /// invocation when `target` is `None`.
    pub fn aggregate(&self, events: &[RawLogRecord], target: Option<&str>) -> InvocationSummary {
        self.aggregate_with_stats(events, target).0
    }

    /// Same as [`aggregate`](Self::aggregate) but also returns the counters.
    pub fn aggregate_with_stats(
        &self,
        events: &[RawLogRecord],
        target: Option<&str>,
    ) -> (InvocationSummary, ParseStats) {
        let state = events
            .iter()
            .fold(FoldState::new(target), |state, record| state.apply(record));
        let resolved = state.target().map(str::to_string);
        let (summary, stats) = state.finish(&self.calculator);

        debug!(
            records = stats.records,
            log_lines = stats.log_lines,
            reports = stats.reports,
            unknown = stats.unknown,
            foreign = stats.foreign,
            malformed = stats.malformed_fields,
            target = resolved.as_deref().unwrap_or("<unresolved>"),
            matched_logs = summary.logs.len(),
            "log stream folded"
        );

        (summary, stats)
    }
}

/// Summarise `events` at the default GB-second price.
pub fn parse(events: &[RawLogRecord], target: Option<&str>) -> InvocationSummary {
    InvocationAggregator::default().aggregate(events, target)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
