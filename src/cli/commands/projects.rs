use colored::Colorize;

use crate::cli::ProjectsAction;
use crate::cli::commands::activity_helpers::{Activity, log_activity};
use crate::cli::commands::shared::{Globals, require_manager, truncate};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::activity_entry::ActivityAction;
use crate::core::models::project::NewProject;
use crate::core::services::admin_service::AdminService;
use crate::core::services::project_service::ProjectService;
use crate::core::traits::admin::AdminApi;

/// Execute `issuelens projects [list|create|delete]`.
///
/// Without a subcommand, lists every project in the event collection
/// regardless of the current window, marking those selected with
/// `--project`.
pub fn execute(globals: &Globals, action: Option<&ProjectsAction>) -> Result<()> {
    match action {
        None => execute_collection(globals),
        Some(ProjectsAction::List) => execute_list(globals),
        Some(ProjectsAction::Create { title, description }) => {
            execute_create(globals, title, description.as_deref())
        }
        Some(ProjectsAction::Delete { uuid }) => execute_delete(globals, uuid),
    }
}

fn execute_collection(globals: &Globals) -> Result<()> {
    let config = globals.config()?;
    let filter = globals.filter(&config)?;
    let events = globals.fetch_events(&config)?;

    let projects = ProjectService.unique_projects(&events);
    output::header(&format!("issuelens projects ({})", projects.len()));

    if projects.is_empty() {
        output::warning("No projects found");
        return Ok(());
    }

    println!();
    for project in &projects {
        let marker = if filter.admits_project(&project.uuid) && !filter.projects.is_empty() {
            "●".green()
        } else {
            "○".dimmed()
        };
        println!("  {marker} {}  {}", project.uuid.dimmed(), project.title);
    }

    Ok(())
}

fn execute_list(globals: &Globals) -> Result<()> {
    let config = globals.config()?;
    let client = globals.api_client(&config)?;

    let sp = output::spinner("Fetching projects...");
    let projects = match client.list_projects() {
        Ok(p) => p,
        Err(e) => {
            output::abandon_spinner(sp);
            return Err(e);
        }
    };
    sp.finish_and_clear();

    output::header(&format!("Registered projects ({})", projects.len()));
    if projects.is_empty() {
        output::warning("No projects registered");
        return Ok(());
    }
    println!();
    for p in &projects {
        let description = p.description.as_deref().unwrap_or("");
        println!(
            "  {}  {:<24} {}",
            p.uuid.dimmed(),
            p.title,
            truncate(description, 48).dimmed()
        );
    }
    Ok(())
}

fn execute_create(globals: &Globals, title: &str, description: Option<&str>) -> Result<()> {
    let project = NewProject::new(title, description)?;
    let config = globals.config()?;
    let client = globals.api_client(&config)?;
    require_manager(&client, "create projects")?;

    let service = AdminService { api: client };
    let created = service.create_project(&project)?;

    let mut activity = Activity::new(ActivityAction::ProjectCreate).detail(project.title.clone());
    match &created {
        Some(p) => {
            output::success(&format!("Created project {} ({})", p.title, p.uuid));
            activity = activity.project(&p.uuid);
        }
        None => output::success(&format!(
            "Created project {} (run 'issuelens projects list' for its uuid)",
            project.title
        )),
    }
    log_activity(&config, activity);
    Ok(())
}

fn execute_delete(globals: &Globals, uuid: &str) -> Result<()> {
    let config = globals.config()?;
    let client = globals.api_client(&config)?;
    require_manager(&client, "delete projects")?;

    let service = AdminService { api: client };
    let gone = service.delete_project(uuid)?;
    output::success(&format!("Deleted project {} ({uuid})", gone.title));

    log_activity(
        &config,
        Activity::new(ActivityAction::ProjectDelete)
            .project(uuid)
            .detail(gone.title),
    );
    Ok(())
}
