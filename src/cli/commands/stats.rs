use colored::Colorize;

use crate::cli::commands::shared::Globals;
use crate::cli::output;
use crate::core::errors::{IssueLensError, Result};
use crate::core::models::dashboard::DashboardView;
use crate::core::models::summary::{Dimension, SummaryEntry};
use crate::core::services::analytics_service::AnalyticsService;

const BAR_WIDTH: usize = 24;

/// Execute the `issuelens stats` command.
///
/// Prints the severity counter cards, the severity breakdown and a
/// breakdown by `--by` (default: server).
pub fn execute(globals: &Globals, by: Option<&str>, json: bool) -> Result<()> {
    let dimension: Dimension = match by {
        Some(code) => code.parse()?,
        None => Dimension::default(),
    };

    let config = globals.config()?;
    let now = globals.now()?;
    let filter = globals.filter(&config)?;
    let events = globals.fetch_events(&config)?;

    let view = AnalyticsService::new(now, &config.issuelens.unknown_label)
        .dashboard(&events, &filter, dimension);

    if json {
        let text = serde_json::to_string_pretty(&view).map_err(|e| IssueLensError::InvalidConfig {
            detail: format!("Failed to serialize stats: {e}"),
        })?;
        println!("{text}");
        return Ok(());
    }

    print_view(&view, dimension);
    Ok(())
}

fn print_view(view: &DashboardView, dimension: Dimension) {
    let scope = if view.filter.projects.is_empty() {
        "all projects".to_string()
    } else {
        format!("{} project(s)", view.filter.projects.len())
    };
    output::header(&format!(
        "issuelens stats ({}, {scope})",
        view.filter.window.label()
    ));

    let s = &view.stats;
    println!();
    println!(
        "  {} {}   {} {}   {} {}   {} {}",
        "Total".bold(),
        s.total,
        "High".red(),
        s.high,
        "Medium".yellow(),
        s.medium,
        "Low".green(),
        s.low,
    );
    if s.unclassified > 0 {
        println!("  {} {}", "Unclassified".dimmed(), s.unclassified);
    }

    print_breakdown("By severity", &view.severity);
    print_breakdown(&format!("By {}", dimension.code()), &view.breakdown);
}

fn print_breakdown(title: &str, entries: &[SummaryEntry]) {
    output::header(title);
    if entries.is_empty() {
        println!("  {}", "no data".dimmed());
        return;
    }

    let total: u64 = entries.iter().map(|e| e.value).sum();
    let peak = entries.iter().map(|e| e.value).max().unwrap_or(0);
    let width = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(32);

    for entry in entries {
        println!(
            "  {:<width$} {:>6} {:>6} {}",
            entry.name,
            entry.value,
            output::percent(entry.value, total).dimmed(),
            output::bar(entry.value, peak, BAR_WIDTH).cyan(),
        );
    }
}
