use colored::Colorize;

use crate::cli::NotificationsAction;
use crate::cli::commands::activity_helpers::{Activity, log_activity};
use crate::cli::commands::shared::{Globals, require_manager};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::activity_entry::ActivityAction;
use crate::core::models::notification::{NewNotification, Notification};
use crate::core::services::admin_service::AdminService;
use crate::core::traits::admin::AdminApi;

/// Execute `issuelens notifications <action>`.
pub fn execute(globals: &Globals, action: &NotificationsAction) -> Result<()> {
    match action {
        NotificationsAction::List => execute_list(globals),
        NotificationsAction::Add {
            project,
            title,
            kind,
            url,
            description,
            channel,
            username,
        } => {
            let request = NewNotification {
                project_uuid: project.trim().to_string(),
                title: title.trim().to_string(),
                description: description.clone(),
                kind: kind.parse()?,
                url: url.trim().to_string(),
                channel: channel.clone(),
                username: username.clone(),
            };
            execute_add(globals, &request)
        }
        NotificationsAction::Remove { id } => execute_remove(globals, *id),
    }
}

fn execute_list(globals: &Globals) -> Result<()> {
    let config = globals.config()?;
    let client = globals.api_client(&config)?;

    let sp = output::spinner("Fetching notifications...");
    let notifications = match client.list_notifications() {
        Ok(n) => n,
        Err(e) => {
            output::abandon_spinner(sp);
            return Err(e);
        }
    };
    sp.finish_and_clear();

    output::header(&format!("Notifications ({})", notifications.len()));
    if notifications.is_empty() {
        output::warning("No integrations configured");
        return Ok(());
    }
    println!();
    for n in &notifications {
        print_notification(n);
    }
    Ok(())
}

fn execute_add(globals: &Globals, request: &NewNotification) -> Result<()> {
    // Reject bad input before touching the network.
    request.validate()?;

    let config = globals.config()?;
    let client = globals.api_client(&config)?;
    require_manager(&client, "manage notifications")?;

    let service = AdminService { api: client };
    let created = service.create_notification(request)?;
    output::success(&format!(
        "Added {} notification '{}' (id {}) to {}",
        request.kind, created.title, created.id, request.project_uuid
    ));

    log_activity(
        &config,
        Activity::new(ActivityAction::NotificationAdd)
            .project(&request.project_uuid)
            .detail(format!("{} #{}: {}", request.kind, created.id, created.title)),
    );
    Ok(())
}

fn execute_remove(globals: &Globals, id: i64) -> Result<()> {
    let config = globals.config()?;
    let client = globals.api_client(&config)?;
    require_manager(&client, "manage notifications")?;

    let service = AdminService { api: client };
    let gone = service.delete_notification(id)?;
    output::success(&format!("Removed notification '{}' (id {id})", gone.title));

    let mut activity =
        Activity::new(ActivityAction::NotificationRemove).detail(format!("#{id}: {}", gone.title));
    if let Some(project) = &gone.project_uuid {
        activity = activity.project(project);
    }
    log_activity(&config, activity);
    Ok(())
}

fn print_notification(n: &Notification) {
    let kind = n.kind.as_deref().unwrap_or("?");
    println!(
        "  {:>4}  {:<10} {}  {}",
        n.id.to_string().dimmed(),
        kind.cyan(),
        n.title,
        n.url.as_deref().unwrap_or("").dimmed()
    );
    let extras: Vec<String> = [("channel", &n.channel), ("as", &n.username), ("note", &n.description)]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| format!("{label} {v}")))
        .collect();
    if !extras.is_empty() {
        println!("        {}", extras.join(", ").dimmed());
    }
}
