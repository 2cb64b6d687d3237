use colored::{ColoredString, Colorize};

use crate::cli::commands::shared::{Globals, truncate};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::event::EventRecord;
use crate::core::services::analytics_service::AnalyticsService;
use crate::core::services::project_service::ProjectService;

const MESSAGE_WIDTH: usize = 60;

/// Execute the `issuelens issues` command.
///
/// Lists the events that pass the current filter, newest first.
pub fn execute(globals: &Globals, level: Option<&str>, last: Option<usize>) -> Result<()> {
    let config = globals.config()?;
    let now = globals.now()?;
    let filter = globals.filter(&config)?;
    let events = globals.fetch_events(&config)?;

    let analytics = AnalyticsService::new(now, &config.issuelens.unknown_label);
    let mut rows: Vec<&EventRecord> = analytics
        .filtered(&events, &filter)
        .into_iter()
        .filter(|e| {
            level.is_none_or(|wanted| {
                e.severity_tag()
                    .is_some_and(|tag| tag.eq_ignore_ascii_case(wanted))
            })
        })
        .collect();
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    if let Some(n) = last {
        rows.truncate(n);
    }

    output::header(&format!(
        "issuelens issues ({}, {} events)",
        filter.window.label(),
        rows.len()
    ));

    if rows.is_empty() {
        output::warning("No events match the current filter");
        if level.is_some() || !filter.projects.is_empty() {
            println!("  Try removing --level or --project to see more.");
        }
        return Ok(());
    }

    let projects = ProjectService.unique_projects(&events);
    println!();
    for event in rows {
        let title = projects
            .iter()
            .find(|p| p.uuid == event.project_uuid)
            .map(|p| p.title.as_str())
            .unwrap_or("");
        print_row(event, title, &now);
    }

    Ok(())
}

fn print_row(event: &EventRecord, project_title: &str, now: &chrono::DateTime<chrono::FixedOffset>) {
    let when = event
        .timestamp
        .with_timezone(now.offset())
        .format("%Y-%m-%d %H:%M");
    let tag = event.severity_tag().unwrap_or("-");
    let kind = event.kind.as_deref().unwrap_or("Event");
    let message = event.value.as_deref().unwrap_or("");

    println!(
        "  {} {} {:<9} {} {} {}",
        when.to_string().dimmed(),
        "│".dimmed(),
        color_level(tag),
        kind.bold(),
        truncate(message, MESSAGE_WIDTH),
        project_title.dimmed(),
    );
}

/// Level tag colored the way the dashboard's badges are.
pub fn color_level(tag: &str) -> ColoredString {
    match tag.to_ascii_lowercase().as_str() {
        "error" => tag.red(),
        "warning" => tag.yellow(),
        "info" => tag.blue(),
        "critical" => tag.magenta(),
        _ => tag.purple(),
    }
}
