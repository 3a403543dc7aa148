//! Text and JSON rendering of an [`InvocationSummary`].

use logs_core::formatting::{format_cost, format_duration_ms, format_memory, format_number};
use logs_core::models::InvocationSummary;
use logs_core::time_utils::TimezoneHandler;

const LABEL_WIDTH: usize = 12;

/// Pretty-printed JSON, suitable for piping into `jq`.
pub fn render_json(summary: &InvocationSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

/// Two-part plain-text view: a usage block followed by the log lines.
pub fn render_table(summary: &InvocationSummary, tz: &TimezoneHandler) -> String {
    if summary.is_empty() {
        return "No records matched the requested invocation.\n".to_string();
    }

    let usage = &summary.usage;
    let mut rows: Vec<(&str, String)> = vec![("Invocation", usage.invocation_id.clone())];

    if let Some(version) = &usage.version {
        rows.push(("Version", version.clone()));
    }
    if let Some(start) = usage.start_time {
        rows.push(("Start", tz.format_millis(start)));
    }
    if let Some(end) = usage.end_time {
        rows.push(("End", tz.format_millis(end)));
    }
    if let Some(elapsed) = usage.elapsed_ms() {
        rows.push(("Elapsed", format_duration_ms(elapsed as f64)));
    }
    if let Some(duration) = usage.duration_ms {
        rows.push(("Duration", format_duration_ms(duration)));
    }
    if let Some(init) = usage.init_duration_ms {
        rows.push(("Init", format_duration_ms(init)));
    }
    rows.push((
        "Billed",
        usage
            .billed_duration_ms
            .map(|ms| format_duration_ms(ms as f64))
            .unwrap_or_else(|| "-".to_string()),
    ));
    rows.push(("Memory", memory_cell(summary)));
    rows.push((
        "Cost",
        usage.cost.map(format_cost).unwrap_or_else(|| "-".to_string()),
    ));

    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{:<width$}{}\n", label, value, width = LABEL_WIDTH));
    }

    out.push('\n');
    out.push_str(&format!("Log lines ({})\n", summary.logs.len()));
    for line in &summary.logs {
        let time = tz.format_millis(line.time);
        let mut payload = line.data.lines();
        out.push_str(&format!("  {}  {}\n", time, payload.next().unwrap_or_default()));
        // Continuation lines of multi-line payloads stay under the message column.
        for rest in payload {
            out.push_str(&format!("  {:width$}  {}\n", "", rest, width = time.len()));
        }
    }

    out
}

/// `"64 MB / 128 MB (50.0%)"`, degrading gracefully when fields are absent.
fn memory_cell(summary: &InvocationSummary) -> String {
    let usage = &summary.usage;
    match (usage.max_memory_used_mb, usage.memory_size_mb) {
        (Some(used), Some(size)) => {
            let pct = usage
                .memory_utilisation()
                .map(|p| format!(" ({}%)", format_number(p, 1)))
                .unwrap_or_default();
            format!("{} / {}{}", format_memory(used), format_memory(size), pct)
        }
        (None, Some(size)) => format!("- / {}", format_memory(size)),
        (Some(used), None) => format_memory(used),
        (None, None) => "-".to_string(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use logs_core::models::{LineKind, LogLine, UsageRecord};

    fn summary() -> InvocationSummary {
        InvocationSummary {
            usage: UsageRecord {
                invocation_id: "abc123".to_string(),
                version: Some("$LATEST".to_string()),
                start_time: Some(1_700_000_000_000),
                end_time: Some(1_700_000_000_250),
                report_time: Some(1_700_000_000_251),
                duration_ms: Some(249.5),
                init_duration_ms: None,
                billed_duration_ms: Some(300),
                memory_size_mb: Some(128),
                max_memory_used_mb: Some(64),
                cost: Some(0.000000625125),
            },
            logs: vec![LogLine {
                invocation_id: "abc123".to_string(),
                kind: LineKind::Log,
                time: 1_700_000_000_010,
                data: "hello world".to_string(),
            }],
        }
    }

    #[test]
    fn test_render_table_usage_block() {
        let out = render_table(&summary(), &TimezoneHandler::new("UTC"));

        assert!(out.contains("Invocation  abc123"));
        assert!(out.contains("Version     $LATEST"));
        assert!(out.contains("Start       2023-11-14 22:13:20.000 UTC"));
        assert!(out.contains("Elapsed     250 ms"));
        assert!(out.contains("Duration    249.5 ms"));
        assert!(out.contains("Billed      300 ms"));
        assert!(out.contains("Memory      64 MB / 128 MB (50.0%)"));
        assert!(out.contains("Cost        $0.000000625"));
        assert!(!out.contains("Init"), "absent init duration is omitted");
    }

    #[test]
    fn test_render_table_log_lines() {
        let out = render_table(&summary(), &TimezoneHandler::new("UTC"));
        assert!(out.contains("Log lines (1)"));
        assert!(out.contains("  2023-11-14 22:13:20.010 UTC  hello world"));
    }

    #[test]
    fn test_render_table_multiline_payload() {
        let mut s = summary();
        s.logs[0].data = "Error: boom\n    at handler".to_string();
        let out = render_table(&s, &TimezoneHandler::new("UTC"));

        let indent = " ".repeat(2 + "2023-11-14 22:13:20.010 UTC".len() + 2);
        assert!(out.contains(&format!("{indent}    at handler")));
    }

    #[test]
    fn test_render_table_absent_cost() {
        let mut s = summary();
        s.usage.cost = None;
        s.usage.billed_duration_ms = None;
        s.usage.max_memory_used_mb = None;
        let out = render_table(&s, &TimezoneHandler::new("UTC"));

        assert!(out.contains("Cost        -"));
        assert!(out.contains("Billed      -"));
        assert!(out.contains("Memory      - / 128 MB"));
    }

    #[test]
    fn test_render_table_empty_summary() {
        let out = render_table(&InvocationSummary::default(), &TimezoneHandler::new("UTC"));
        assert_eq!(out, "No records matched the requested invocation.\n");
    }

    #[test]
    fn test_render_json_shape() {
        let json = render_json(&summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["usage"]["invocation_id"], "abc123");
        assert_eq!(value["usage"]["billed_duration_ms"], 300);
        assert_eq!(value["logs"][0]["kind"], "log");
        assert_eq!(value["logs"][0]["data"], "hello world");
        assert!(value["usage"].get("init_duration_ms").is_none());
    }
}
