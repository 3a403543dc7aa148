//! Shape-based classification of Lambda log-stream lines.
//!
//! The platform interleaves function output and its own START / END / REPORT
//! markers on one stream with no type tag, so each line is recognised purely
//! by its tab and colon structure.

use std::str::FromStr;
use std::sync::OnceLock;

use logs_core::error::{LambdaLogError, Result};
use regex::Regex;

// ── Field keys ────────────────────────────────────────────────────────────────

pub const KEY_REQUEST_ID: &str = "REPORT RequestId";
pub const KEY_DURATION: &str = "Duration";
pub const KEY_BILLED_DURATION: &str = "Billed Duration";
pub const KEY_MEMORY_SIZE: &str = "Memory Size";
pub const KEY_MAX_MEMORY_USED: &str = "Max Memory Used";
pub const KEY_INIT_DURATION: &str = "Init Duration";

const START_PREFIX: &str = "START RequestId";
const END_PREFIX: &str = "END RequestId";

// ── Public types ──────────────────────────────────────────────────────────────

/// One classified log line. Borrowed from the message it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord<'a> {
    /// Function output: `<timestamp>\t<request id>\t<payload>`.
    Log {
        invocation_id: &'a str,
        data: &'a str,
    },
    /// `START RequestId: <id> Version: <v>`.
    Start {
        invocation_id: &'a str,
        version: Option<&'a str>,
    },
    /// `END RequestId: <id>`.
    End { invocation_id: &'a str },
    /// Tab-separated `REPORT RequestId: ...` usage line.
    Report(ReportFields<'a>),
    /// Single-part line that carries no known marker.
    Unknown,
}

/// Fields extracted from a REPORT line. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFields<'a> {
    pub invocation_id: Option<&'a str>,
    pub duration_ms: Option<f64>,
    pub billed_duration_ms: Option<u64>,
    pub memory_size_mb: Option<u64>,
    pub max_memory_used_mb: Option<u64>,
    pub init_duration_ms: Option<f64>,
    /// Messages for values that were present but failed to parse.
    pub malformed: Vec<String>,
}

// ── Classification ────────────────────────────────────────────────────────────

/// Classify one trimmed log message.
///
/// Precedence: three tab-separated parts is a LOG line; a line without tabs
/// is a START / END marker or UNKNOWN; every other tab count is a REPORT.
pub fn classify(message: &str) -> LogRecord<'_> {
    let parts: Vec<&str> = message.split('\t').collect();

    match parts.len() {
        3 => LogRecord::Log {
            invocation_id: parts[1],
            data: parts[2],
        },
        1 => classify_marker(message),
        _ => LogRecord::Report(parse_report(&parts)),
    }
}

/// Handle a line with no tab characters.
fn classify_marker(line: &str) -> LogRecord<'_> {
    let prefix = line.split(':').next().unwrap_or_default().trim();

    match prefix {
        START_PREFIX => match start_regex().captures(line) {
            Some(cap) => LogRecord::Start {
                invocation_id: cap.get(1).map_or("", |m| m.as_str()),
                version: cap.get(2).map(|m| m.as_str()),
            },
            None => LogRecord::Unknown,
        },
        END_PREFIX => match end_regex().captures(line) {
            Some(cap) => LogRecord::End {
                invocation_id: cap.get(1).map_or("", |m| m.as_str()),
            },
            None => LogRecord::Unknown,
        },
        _ => LogRecord::Unknown,
    }
}

/// Collect the known `key: value` fields of a REPORT line.
fn parse_report<'a>(parts: &[&'a str]) -> ReportFields<'a> {
    let mut report = ReportFields::default();

    for part in parts {
        let Some((key, value)) = part.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            KEY_REQUEST_ID => report.invocation_id = Some(value),
            KEY_DURATION => {
                report.duration_ms = collect(&mut report.malformed, KEY_DURATION, value, "ms")
            }
            KEY_BILLED_DURATION => {
                report.billed_duration_ms =
                    collect(&mut report.malformed, KEY_BILLED_DURATION, value, "ms")
            }
            KEY_MEMORY_SIZE => {
                report.memory_size_mb = collect(&mut report.malformed, KEY_MEMORY_SIZE, value, "MB")
            }
            KEY_MAX_MEMORY_USED => {
                report.max_memory_used_mb =
                    collect(&mut report.malformed, KEY_MAX_MEMORY_USED, value, "MB")
            }
            KEY_INIT_DURATION => {
                report.init_duration_ms =
                    collect(&mut report.malformed, KEY_INIT_DURATION, value, "ms")
            }
            _ => {}
        }
    }

    report
}

fn collect<T: FromStr>(
    malformed: &mut Vec<String>,
    field: &str,
    raw: &str,
    suffix: &str,
) -> Option<T> {
    match parse_unit_value(field, raw, suffix) {
        Ok(v) => Some(v),
        Err(e) => {
            malformed.push(e.to_string());
            None
        }
    }
}

// ── Unit parsing ──────────────────────────────────────────────────────────────

/// Strip a literal unit `suffix` from `raw` and parse the remaining number.
///
/// An unexpected unit is not stripped, so `"3 s"` with suffix `"ms"` fails
/// with [`LambdaLogError::MalformedRecord`].
///
/// ```
/// use logs_data::classifier::parse_unit_value;
///
/// let billed: u64 = parse_unit_value("Billed Duration", "300 ms", "ms").unwrap();
/// assert_eq!(billed, 300);
/// assert!(parse_unit_value::<u64>("Memory Size", "1 GB", "MB").is_err());
/// ```
pub fn parse_unit_value<T: FromStr>(field: &str, raw: &str, suffix: &str) -> Result<T> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix(suffix).unwrap_or(trimmed).trim();
    number
        .parse::<T>()
        .map_err(|_| LambdaLogError::malformed(field, raw))
}

fn start_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^START RequestId:\s*(\S+)(?:\s+Version:\s*(\S+))?").expect("regex is valid")
    })
}

fn end_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^END RequestId:\s*(\S+)").expect("regex is valid"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
