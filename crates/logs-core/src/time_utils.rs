use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Convert epoch milliseconds (as delivered by the log store) to UTC.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

// ── TimezoneHandler ───────────────────────────────────────────────────────────

/// Renders log-store timestamps in a configured timezone.
pub struct TimezoneHandler {
    default_tz: Tz,
}

impl TimezoneHandler {
    /// Create a handler with the given IANA timezone name as the default.
    ///
    /// If `tz_name` is not a recognised IANA timezone, falls back to UTC
    /// and logs a warning.
    pub fn new(tz_name: &str) -> Self {
        let tz = tz_name.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                "TimezoneHandler: unrecognised timezone \"{}\", falling back to UTC",
                tz_name
            );
            Tz::UTC
        });
        Self { default_tz: tz }
    }

    /// Convert epoch milliseconds to a datetime in the handler's timezone.
    pub fn localize(&self, millis: i64) -> Option<DateTime<Tz>> {
        from_epoch_millis(millis).map(|dt| dt.with_timezone(&self.default_tz))
    }

    /// Render epoch milliseconds as `YYYY-MM-DD HH:MM:SS.mmm TZ`.
    ///
    /// Out-of-range values are rendered as the raw integer.
    pub fn format_millis(&self, millis: i64) -> String {
        match self.localize(millis) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f %Z").to_string(),
            None => millis.to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
