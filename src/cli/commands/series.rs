use colored::Colorize;

use crate::cli::commands::shared::Globals;
use crate::cli::output;
use crate::core::errors::{IssueLensError, Result};
use crate::core::services::analytics_service::AnalyticsService;
use crate::core::services::series_service::SeriesService;

const BAR_WIDTH: usize = 40;

/// Execute the `issuelens series` command.
///
/// One row per calendar day of the window, zero days included.
pub fn execute(globals: &Globals, json: bool) -> Result<()> {
    let config = globals.config()?;
    let now = globals.now()?;
    let filter = globals.filter(&config)?;
    let events = globals.fetch_events(&config)?;

    let filtered = AnalyticsService::new(now, &config.issuelens.unknown_label).filtered(&events, &filter);
    let series = SeriesService.build_daily(&filtered, filter.window, &now);

    if json {
        let text = serde_json::to_string_pretty(&series).map_err(|e| IssueLensError::InvalidConfig {
            detail: format!("Failed to serialize series: {e}"),
        })?;
        println!("{text}");
        return Ok(());
    }

    output::header(&format!(
        "issuelens series ({}, {} days, {} events)",
        filter.window.label(),
        series.len(),
        series.total()
    ));

    if series.is_empty() {
        output::warning("No events to chart");
        return Ok(());
    }

    let peak = series.peak();
    println!();
    for (date, count) in series.iter() {
        let day = date.format("%Y-%m-%d").to_string();
        if count == 0 {
            println!("  {} {:>5}", day.dimmed(), count.to_string().dimmed());
        } else {
            println!(
                "  {} {:>5} {}",
                day,
                count,
                output::bar(count, peak, BAR_WIDTH).cyan()
            );
        }
    }

    Ok(())
}
