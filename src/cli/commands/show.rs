use colored::Colorize;

use crate::cli::commands::issues::color_level;
use crate::cli::commands::shared::Globals;
use crate::cli::output;
use crate::core::errors::{IssueLensError, Result};
use crate::core::models::event::EventRecord;
use crate::core::services::project_service::ProjectService;

/// Execute the `issuelens show <uuid>` command.
///
/// Looks the event up in the full collection, ignoring the window and
/// project filters.
pub fn execute(globals: &Globals, uuid: &str) -> Result<()> {
    let config = globals.config()?;
    let now = globals.now()?;
    let events = globals.fetch_events(&config)?;

    let event = events
        .iter()
        .find(|e| e.uuid == uuid)
        .ok_or_else(|| IssueLensError::EventNotFound {
            uuid: uuid.to_string(),
        })?;

    let title = ProjectService.title_of(&events, &event.project_uuid);
    let kind = event.kind.as_deref().unwrap_or("Event");
    output::header(&format!("{kind} — {title}"));

    if let Some(message) = &event.value {
        println!("  {message}");
    }
    println!();

    field("uuid", Some(event.uuid.clone()));
    field(
        "time",
        Some(
            event
                .timestamp
                .with_timezone(now.offset())
                .format("%Y-%m-%d %H:%M:%S %:z")
                .to_string(),
        ),
    );
    if let Some(tag) = event.severity_tag() {
        println!("  {:<10} {}", "severity".dimmed(), color_level(tag));
    }
    field("level", event.level.clone());
    field("project", Some(event.project_uuid.clone()));
    field("location", event.location().or_else(|| event.abs_path.clone()));
    field("function", event.function.clone());
    field("module", event.module.clone());
    field("platform", event.platform.clone());
    field("server", event.server_name.clone());
    field("runtime", event.runtime());
    field("build", event.runtime_build.clone());

    print_context(event);

    Ok(())
}

fn field(name: &str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        println!("  {:<10} {}", name.dimmed(), value);
    }
}

/// Print the captured source lines, highlighting the failing one.
fn print_context(event: &EventRecord) {
    let Some(context) = event.context.as_deref().filter(|c| !c.is_empty()) else {
        return;
    };

    output::header("Context");
    let start = event.start_line.unwrap_or(1);
    for (i, line) in context.lines().enumerate() {
        let number = start + i as u32;
        let gutter = format!("{number:>5} │");
        if Some(number) == event.lineno {
            println!("{} {}", gutter.red(), line.bold());
        } else {
            println!("{} {}", gutter.dimmed(), line);
        }
    }
}
