mod bootstrap;
mod render;

use anyhow::{bail, Result};
use logs_core::models::InvocationSummary;
use logs_core::pricing::CostCalculator;
use logs_core::settings::Settings;
use logs_core::time_utils::TimezoneHandler;
use logs_runtime::parser::{LogParser, LogRequest};
use logs_runtime::source::{CloudWatchSource, FileSource, LogEventSource};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("lambda-logs v{} starting", env!("CARGO_PKG_VERSION"));

    let calculator = CostCalculator::new(settings.price_per_gb_second);

    let summary = match (&settings.events_file, settings.stream_names()) {
        (Some(path), _) => {
            tracing::info!("Reading events from {}", path.display());
            let request = LogRequest::new("events-file", path.display().to_string());
            summarise(FileSource::new(path), calculator, &settings, request).await?
        }
        (None, Some((group, stream))) => {
            tracing::info!(
                "Fetching {}/{} (region: {})",
                group,
                stream,
                settings.region.as_deref().unwrap_or("default")
            );
            let source =
                CloudWatchSource::from_env(settings.region.as_deref(), settings.profile.as_deref())
                    .await;
            summarise(source, calculator, &settings, LogRequest::new(group, stream)).await?
        }
        // `Settings` already rejects this through `required_unless_present`;
        // only settings built outside clap can get here.
        (None, None) => bail!("either --events-file or both --log-group and --log-stream are required"),
    };

    let output = if settings.json_output() {
        render::render_json(&summary)?
    } else {
        render::render_table(&summary, &TimezoneHandler::new(&settings.timezone))
    };
    println!("{}", output.trim_end());

    Ok(())
}

/// Fetch once through `source` and summarise the requested invocation.
async fn summarise<S: LogEventSource>(
    source: S,
    calculator: CostCalculator,
    settings: &Settings,
    mut request: LogRequest,
) -> Result<InvocationSummary> {
    request.request_id = settings.request_id.clone();

    let parser = LogParser::new(source, calculator);
    let summary = parser.get_log_data(&request).await?;

    tracing::info!(
        invocation = %summary.usage.invocation_id,
        log_lines = summary.logs.len(),
        "invocation summarised"
    );
    Ok(summary)
}
