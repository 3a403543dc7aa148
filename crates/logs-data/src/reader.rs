//! Loading of exported log events from disk.
//!
//! Accepts the JSON printed by `aws logs get-log-events` (an object with an
//! `events` array), a bare JSON array of events, or JSON Lines with one event
//! per line. Events are returned in file order.

use std::path::Path;

use logs_core::error::{LambdaLogError, Result};
use logs_core::models::RawLogRecord;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Deserialize)]
#[serde(untagged)]
enum EventsDocument {
    Wrapped { events: Vec<RawLogRecord> },
    Bare(Vec<RawLogRecord>),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Read and decode an events file.
pub fn load_events(path: &Path) -> Result<Vec<RawLogRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| LambdaLogError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let events = parse_events_document(&content)?;
    debug!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Decode events from an in-memory document in any supported layout.
pub fn parse_events_document(content: &str) -> Result<Vec<RawLogRecord>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<EventsDocument>(trimmed) {
        Ok(EventsDocument::Wrapped { events }) | Ok(EventsDocument::Bare(events)) => Ok(events),
        Err(err) if looks_like_json_lines(trimmed) => {
            debug!("Not a single JSON document ({}); reading as JSON Lines", err);
            Ok(parse_json_lines(trimmed))
        }
        Err(err) => Err(err.into()),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// `true` when the first non-empty line is a complete event object.
fn looks_like_json_lines(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| serde_json::from_str::<RawLogRecord>(line).is_ok())
}

/// Decode one event per line, skipping lines that do not parse.
fn parse_json_lines(content: &str) -> Vec<RawLogRecord> {
    let mut events = Vec::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<RawLogRecord>(line) {
            Ok(event) => events.push(event),
            Err(e) => {
                skipped += 1;
                debug!("Skipping unparseable event line: {}", e);
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} unparseable event lines", skipped);
    }

    events
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CLI_OUTPUT: &str = r#"{
        "events": [
            {"timestamp": 1700000000000, "message": "START RequestId: abc123 Version: $LATEST\n", "ingestionTime": 1700000000050},
            {"timestamp": 1700000000010, "message": "2023-11-14T22:13:20.010Z\tabc123\thello\n", "ingestionTime": 1700000000060}
        ],
        "nextForwardToken": "f/123",
        "nextBackwardToken": "b/123"
    }"#;

    #[test]
    fn test_parse_cli_output_object() {
        let events = parse_events_document(CLI_OUTPUT).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp, 1_700_000_000_000);
        assert!(events[1].message.contains("hello"));
    }

    #[test]
    fn test_parse_bare_array() {
        let doc = r#"[{"timestamp": 1, "message": "a"}, {"timestamp": 2, "message": "b"}]"#;
        let events = parse_events_document(doc).unwrap();
        assert_eq!(
            events,
            vec![RawLogRecord::new(1, "a"), RawLogRecord::new(2, "b")]
        );
    }

    #[test]
    fn test_parse_json_lines_skips_bad_lines() {
        let doc = "{\"timestamp\": 1, \"message\": \"a\"}\n\nnot json\n{\"timestamp\": 3, \"message\": \"c\"}\n";
        let events = parse_events_document(doc).unwrap();
        assert_eq!(
            events,
            vec![RawLogRecord::new(1, "a"), RawLogRecord::new(3, "c")]
        );
    }

    #[test]
    fn test_parse_keeps_file_order() {
        let doc = r#"[{"timestamp": 5, "message": "late"}, {"timestamp": 1, "message": "early"}]"#;
        let events = parse_events_document(doc).unwrap();
        assert_eq!(events[0].message, "late");
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_events_document("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage_is_json_error() {
        let err = parse_events_document("{\"events\": 12}").unwrap_err();
        assert!(matches!(err, LambdaLogError::JsonParse(_)));
    }

    #[test]
    fn test_load_events_from_file() {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(CLI_OUTPUT.as_bytes()).expect("write");

        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_load_events_missing_file() {
        let err = load_events(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LambdaLogError::FileRead { .. }));
    }
}
