//! CLI entry point: fetch one stop's arrivals and log them as text.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::Parser;
use reqwest::Url;
use std::ffi::OsStr;
use std::path::Path;
use stop_board::{
    fetch::{BasicClient, DEFAULT_ENDPOINT, StopInfoClient},
    output::{print_json, print_text},
    schedule::project,
};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "stop_board")]
#[command(about = "Shows upcoming arrivals at a public-transit stop", long_about = None)]
struct Cli {
    /// Stop identifier, as in https://yandex.ru/maps/213/moscow/stops/stop__<ID>
    #[arg(value_name = "STOP_ID", env = "STOP_ID", default_value = "9645370")]
    stop_id: String,

    /// Stop-info endpoint
    #[arg(long, env = "STOP_INFO_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: Url,

    /// Timezone arrival times are rendered in
    #[arg(long, env = "STOP_TIMEZONE", default_value = "Europe/Moscow")]
    timezone: Tz,

    /// Log the schedule as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

const DEFAULT_LOG_FILE: &str = "logs/stop_board.log";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = init_logging()?;

    let cli = Cli::parse();
    run(cli).await
}

/// Installs a coloured stderr layer (`RUST_LOG`, default `info`) and a JSON
/// daily-rolling file layer (`RUST_LOG_JSON`, default `debug`) at
/// `LOG_FILE_PATH`. The returned guard flushes the file on drop.
fn init_logging() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let (log_dir, log_file_name) = log_file_location(&log_file_path);
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, log_file_name));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info")?);

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(file_writer)
        .with_filter(env_filter("RUST_LOG_JSON", "debug")?);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()?;

    Ok(guard)
}

fn env_filter(var: &str, default_directive: &str) -> Result<EnvFilter> {
    Ok(EnvFilter::from_env(var).add_directive(default_directive.parse()?))
}

/// Splits a log file path into directory and file name. A bare file name
/// lands in `logs/`.
fn log_file_location(path: &str) -> (&Path, &OsStr) {
    let path = Path::new(path);
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let file_name = path.file_name().unwrap_or(OsStr::new("stop_board.log"));
    (dir, file_name)
}

#[tracing::instrument(skip_all, fields(stop_id = %cli.stop_id))]
async fn run(cli: Cli) -> Result<()> {
    let http = BasicClient::new().context("Failed to build HTTP client")?;
    let client = StopInfoClient::new(http, cli.endpoint);

    let resp = client
        .fetch_stop_info(&cli.stop_id)
        .await
        .with_context(|| format!("Failed to fetch stop {}", cli.stop_id))?;

    // fetch_stop_info only returns responses that carry data
    let Some(data) = resp.data else {
        anyhow::bail!("Stop {} returned no data", cli.stop_id);
    };
    debug!(
        id = data.id.as_deref().unwrap_or_default(),
        transports = data.transports.len(),
        "Stop info decoded"
    );

    let view = project(&data);
    info!(routes = view.routes.len(), "Schedule projected");

    if cli.json {
        print_json(&view)?;
    } else {
        print_text(&view, cli.timezone);
    }

    Ok(())
}
