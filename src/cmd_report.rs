//! `last` and `history` subcommand handlers, and the live result feed of
//! `watch`.

use std::io::Write;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

use chickenshield_api::view::{explanation, ViewMode};
use chickenshield_api::display_tag;
use chickenshield_config::Config;
use chickenshield_protocols::{ResultStore, RiskReport, StoreChange};

use crate::setup;

/// Show the stored last result.
pub(crate) async fn show_last(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = setup::open_store(config).await?;
    let Some(report) = store.get_last().await? else {
        if json {
            println!("null");
        } else {
            println!("No scan results yet.");
        }
        return Ok(());
    };

    print_report(&report, json)?;
    if !json {
        println!();
        println!("Dashboard: {}", dashboard_link(&config.dashboard.base_url(), &report)?);
    }
    Ok(())
}

/// List stored history.
pub(crate) async fn show_history(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = setup::open_store(config).await?;
    let history = store.history().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    println!("{:<26} {:<11} {:>5}  {}", "TIME", "VERDICT", "RISK", "SOURCE");
    println!("{}", "-".repeat(80));
    for report in &history {
        println!("{}", history_line(report));
    }
    Ok(())
}

/// Print one report, as JSON or in the popup layout.
pub(crate) fn print_report(report: &RiskReport, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_report(report));
    }
    Ok(())
}

/// Write the popup summary to `out` each time the last result changes.
/// Returns once the store stops publishing.
pub(crate) async fn follow_results<W: Write>(mut changes: broadcast::Receiver<StoreChange>, out: &mut W) {
    loop {
        match changes.recv().await {
            Ok(change) => {
                let Some(text) = render_change(&change) else {
                    continue;
                };
                if let Err(e) = writeln!(out, "{}\n{}", "-".repeat(40), text).and_then(|_| out.flush()) {
                    warn!("Failed to print result: {}", e);
                    return;
                }
            }
            Err(RecvError::Lagged(skipped)) => warn!("Skipped {} result updates", skipped),
            Err(RecvError::Closed) => return,
        }
    }
}

fn render_change(change: &StoreChange) -> Option<String> {
    match change {
        StoreChange::LastResult { new_value, .. } => Some(render_report(new_value)),
        StoreChange::History { .. } => None,
    }
}

fn render_report(report: &RiskReport) -> String {
    if report.error {
        return format!(
            "Verdict:     Error\n{}\n",
            report.explanation.as_deref().unwrap_or("Unknown error")
        );
    }

    let kind = report
        .assessment
        .content_type
        .map(|k| k.as_str())
        .unwrap_or("unknown");
    let mut out = String::new();
    out.push_str(&format!("Source:      {} ({})\n", report.source, kind));
    if !report.title.is_empty() {
        out.push_str(&format!("Title:       {}\n", report.title));
    }
    out.push_str(&format!("Verdict:     {}\n", report.verdict().as_str().to_uppercase()));
    out.push_str(&format!("Risk score:  {}\n", report.risk_score()));
    out.push_str(&format!("Scanned at:  {}\n", report.timestamp));

    let text = explanation(report, ViewMode::Technical);
    if !text.is_empty() {
        out.push_str(&format!("\n{}\n", text));
    }

    out.push_str("\nSocial engineering:\n");
    out.push_str(&indicator_list(&report.assessment.social_engineering_indicators));
    out.push_str("\nTechnical indicators:\n");
    out.push_str(&indicator_list(&report.assessment.technical_indicators));
    out
}

fn indicator_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return "  - None detected\n".to_string();
    }
    tags.iter().map(|t| format!("  - {}\n", display_tag(t))).collect()
}

fn history_line(report: &RiskReport) -> String {
    let verdict = if report.error { "error" } else { report.verdict().as_str() };
    let source = if report.source.is_empty() { "Unknown Source" } else { report.source.as_str() };
    format!(
        "{:<26} {:<11} {:>5}  {}",
        report.timestamp,
        verdict,
        report.risk_score(),
        source
    )
}

/// Dashboard URL that seeds the view with `report`.
fn dashboard_link(base_url: &str, report: &RiskReport) -> Result<String, serde_json::Error> {
    let encoded: String = url::form_urlencoded::byte_serialize(serde_json::to_string(report)?.as_bytes()).collect();
    Ok(format!("{}/?data={}", base_url, encoded))
}
