//! ChickenShield - phishing and scam risk analysis
//!
//! Main entry point for the ChickenShield CLI, tab watcher and dashboard.

mod cli;
mod cmd_dashboard;
mod cmd_export;
mod cmd_report;
mod cmd_scan;
mod cmd_watch;
mod setup;

use std::path::Path;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files are written to `<data_dir>/logs/` with daily rotation.
fn init_tracing(log_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("chickenshield")
        .filename_suffix("log")
        .max_log_files(14)
        .build(log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes the file writer on exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr)
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = setup::load_config(&cli.config)?;

    init_tracing(&config.store.data_dir.join("logs"))?;

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => cmd_watch::run_watch(&config).await,
        Commands::Scan { url, json } => cmd_scan::run_scan(&config, url, json).await,
        Commands::Last { json } => cmd_report::show_last(&config, json).await,
        Commands::History { json } => cmd_report::show_history(&config, json).await,
        Commands::Dashboard { host, port } => cmd_dashboard::run_dashboard(&config, host, port).await,
        Commands::Export { url, output } => cmd_export::run_export(&config, url, &output).await,
    }
}
