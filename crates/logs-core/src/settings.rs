use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Summarise a single Lambda invocation from its CloudWatch log stream
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lambda-logs",
    about = "Summarise a single Lambda invocation from its CloudWatch log stream",
    version
)]
pub struct Settings {
    /// CloudWatch log group, e.g. /aws/lambda/my-function
    #[arg(long, required_unless_present = "events_file")]
    pub log_group: Option<String>,

    /// CloudWatch log stream inside the group
    #[arg(long, required_unless_present = "events_file")]
    pub log_stream: Option<String>,

    /// Invocation (request) id; defaults to the first START marker in the stream
    #[arg(long)]
    pub request_id: Option<String>,

    /// Parse an exported events JSON file instead of calling CloudWatch
    #[arg(long, conflicts_with_all = ["log_group", "log_stream"])]
    pub events_file: Option<PathBuf>,

    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// AWS shared-config profile
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub output: String,

    /// Timezone used to render timestamps (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Override the price per GB-second used for the cost estimate
    #[arg(long)]
    pub price_per_gb_second: Option<f64>,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and resolve `"auto"` values.
    ///
    /// Every value comes from the command line, its environment variable or
    /// the clap default; nothing is carried over between runs.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Same as [`Settings::load`] with explicit arguments.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve_auto_values(Settings::parse_from(args))
    }

    /// Resolve `"auto"` sentinel values and apply the `--debug` flag.
    fn resolve_auto_values(mut settings: Settings) -> Settings {
        if settings.timezone == "auto" {
            settings.timezone = crate::time_utils::get_system_timezone();
        }

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }

    /// Group and stream names, when the remote log store is the event origin.
    pub fn stream_names(&self) -> Option<(&str, &str)> {
        match (self.log_group.as_deref(), self.log_stream.as_deref()) {
            (Some(group), Some(stream)) => Some((group, stream)),
            _ => None,
        }
    }

    /// `true` when the summary should be emitted as JSON.
    pub fn json_output(&self) -> bool {
        self.output == "json"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
