use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;

use crate::adapters::activity::json_activity_log::JsonActivityLog;
use crate::cli::commands::shared::take_last;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::{IssueLensError, Result};
use crate::core::models::activity_entry::{ActivityAction, ActivityEntry};
use crate::core::traits::activity::ActivityLog;

/// Execute the `issuelens log` command.
///
/// Displays the activity log with optional filters for action, date,
/// and entry count.
pub fn execute(action: Option<&str>, since: Option<&str>, last: Option<usize>) -> Result<()> {
    let dir = context::config_dir();
    if !dir.exists() {
        return Err(IssueLensError::InvalidConfig {
            detail: "issuelens not initialized. Run 'issuelens init' first.".into(),
        });
    }

    let config = AppConfig::load(dir)?;
    let log = JsonActivityLog::from_config(dir, config.activity.as_ref());

    let action = action.map(parse_action).transpose()?;
    let since_dt = since.map(parse_since).transpose()?;

    let entries = take_last(log.query(action, since_dt)?, last);

    if entries.is_empty() {
        output::header("issuelens log");
        output::warning("No activity entries found");
        if action.is_some() || since.is_some() {
            println!("  Try removing filters to see all entries.");
        }
        return Ok(());
    }

    output::header(&format!("issuelens log ({} entries)", entries.len()));
    println!();

    for entry in &entries {
        print_entry(entry);
    }

    Ok(())
}

fn parse_action(s: &str) -> Result<ActivityAction> {
    ActivityAction::ALL
        .into_iter()
        .find(|a| a.as_str() == s)
        .ok_or_else(|| IssueLensError::InvalidConfig {
            detail: format!("Unknown action '{s}'"),
        })
}

/// Parse a date string (ISO 8601: `YYYY-MM-DD`) into midnight UTC.
fn parse_since(s: &str) -> Result<DateTime<Utc>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| IssueLensError::InvalidTimestamp {
            value: s.to_string(),
        })
}

/// Print a single activity entry as a formatted row.
fn print_entry(entry: &ActivityEntry) {
    let date = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
    let status = if entry.ok { "✓".green() } else { "✗".red() };
    let project = entry.project.as_deref().unwrap_or("").cyan();
    let files = if entry.files.is_empty() {
        "—".dimmed().to_string()
    } else {
        entry.files.join(", ")
    };
    let detail = entry.detail.as_deref().unwrap_or("").dimmed();

    println!(
        "  {} {} {} {:<14} {} {} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        status,
        format_action(entry.action),
        project,
        files,
        detail,
    );
}

/// Format an ActivityAction as a colored string.
fn format_action(action: ActivityAction) -> String {
    match action {
        ActivityAction::Init => "init".cyan().to_string(),
        ActivityAction::MemberAdd => "member add".green().to_string(),
        ActivityAction::MemberRemove => "member rm".red().to_string(),
        ActivityAction::ProjectCreate => "project add".green().to_string(),
        ActivityAction::ProjectDelete => "project rm".red().to_string(),
        ActivityAction::NotificationAdd => "notify add".magenta().to_string(),
        ActivityAction::NotificationRemove => "notify rm".magenta().to_string(),
        ActivityAction::Export => "export".yellow().to_string(),
        ActivityAction::Import => "import".blue().to_string(),
    }
}
