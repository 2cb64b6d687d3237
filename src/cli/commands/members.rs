use colored::Colorize;
use tracing::info;

use crate::cli::MembersAction;
use crate::cli::commands::activity_helpers::{Activity, log_activity};
use crate::cli::commands::shared::{Globals, require_manager};
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::{IssueLensError, Result};
use crate::core::models::activity_entry::ActivityAction;
use crate::core::models::member::{Member, MemberDiff, MemberOp, SyncReport, UserId};
use crate::core::services::member_service::MemberService;
use crate::core::traits::admin::AdminApi;
use crate::core::traits::membership::MembershipApi;

/// Execute `issuelens members <action>`.
pub fn execute(globals: &Globals, action: &MembersAction) -> Result<()> {
    match action {
        MembersAction::List { project } => execute_list(globals, project),
        MembersAction::Users => execute_users(globals),
        MembersAction::Diff { current, desired } => {
            execute_diff(current, desired);
            Ok(())
        }
        MembersAction::Sync {
            project,
            desired,
            dry_run,
        } => execute_sync(globals, project, desired, *dry_run),
    }
}

fn execute_list(globals: &Globals, project: &str) -> Result<()> {
    let config = globals.config()?;
    let client = globals.api_client(&config)?;

    let sp = output::spinner(&format!("Fetching members of {project}..."));
    let members = match client.list_members(project) {
        Ok(m) => m,
        Err(e) => {
            output::abandon_spinner(sp);
            return Err(e);
        }
    };
    sp.finish_and_clear();

    output::header(&format!("Members of {project} ({})", members.len()));
    if members.is_empty() {
        output::warning("No members");
        return Ok(());
    }
    println!();
    print_members(&members);
    Ok(())
}

/// Every account on the backend, to pick ids for `sync --desired`.
fn execute_users(globals: &Globals) -> Result<()> {
    let config = globals.config()?;
    let client = globals.api_client(&config)?;
    require_manager(&client, "list users")?;

    let users = client.list_users()?;
    output::header(&format!("Users ({})", users.len()));
    if users.is_empty() {
        output::warning("No users");
        return Ok(());
    }
    println!();
    print_members(&users);
    Ok(())
}

/// Offline comparison of two id lists.
fn execute_diff(current: &[UserId], desired: &[UserId]) {
    let diff = MemberDiff::between(current.iter().copied(), desired.iter().copied());
    output::header("issuelens members diff");
    print_diff(&diff);
}

fn execute_sync(globals: &Globals, project: &str, desired: &[UserId], dry_run: bool) -> Result<()> {
    let config = globals.config()?;
    let client = globals.api_client(&config)?;

    require_manager(&client, "change project members")?;

    let service = MemberService { api: client };

    if dry_run {
        let diff = service.plan(project, desired)?;
        output::header(&format!("Planned changes for {project} (dry run)"));
        print_diff(&diff);
        return Ok(());
    }

    output::header(&format!("Syncing members of {project}"));
    let report = service.sync(project, desired)?;
    record_calls(&config, &report);
    print_report(&report);

    if report.is_complete() {
        return Ok(());
    }
    Err(IssueLensError::MembershipSyncIncomplete {
        failed: report.failed().count(),
        attempted: report.calls.len(),
    })
}

fn record_calls(config: &AppConfig, report: &SyncReport) {
    for call in &report.calls {
        let action = match call.op {
            MemberOp::Add => ActivityAction::MemberAdd,
            MemberOp::Remove => ActivityAction::MemberRemove,
        };
        let mut activity = Activity::new(action)
            .project(&report.project_uuid)
            .detail(format!("user {}", call.user_id));
        if let Some(err) = &call.error {
            activity = activity.detail(format!("user {}: {err}", call.user_id)).failed();
        }
        log_activity(config, activity);
    }
    info!(
        project = %report.project_uuid,
        calls = report.calls.len(),
        "recorded membership calls"
    );
}

fn print_diff(diff: &MemberDiff) {
    if diff.is_empty() {
        output::success("Already in sync, nothing to change");
        return;
    }
    println!("  {} {}", "+ add:".green(), join_ids(&diff.to_add));
    println!("  {} {}", "- remove:".red(), join_ids(&diff.to_remove));
}

fn print_report(report: &SyncReport) {
    if report.calls.is_empty() {
        output::success("Already in sync, nothing to change");
        return;
    }

    for call in &report.calls {
        let (done, verb) = match call.op {
            MemberOp::Add => ("Added", "add"),
            MemberOp::Remove => ("Removed", "remove"),
        };
        match &call.error {
            None => output::success(&format!("{done} user {}", call.user_id)),
            Some(err) => output::error(&format!(
                "Could not {verb} user {}: {}",
                call.user_id,
                err.lines().next().unwrap_or(err)
            )),
        }
    }

    if let Some(members) = &report.members_after {
        output::header(&format!("Members now ({})", members.len()));
        print_members(members);
    }
}

fn print_members(members: &[Member]) {
    for m in members {
        let role = m.role.map(|r| r.to_string()).unwrap_or_default();
        println!(
            "  {:>6}  {:<24} {:<16} {}",
            m.id.to_string().dimmed(),
            m.display_name(),
            m.login.dimmed(),
            role.cyan()
        );
    }
}

fn join_ids(ids: &[UserId]) -> String {
    if ids.is_empty() {
        return "—".to_string();
    }
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_join_with_placeholder() {
        assert_eq!(join_ids(&[1, 2]), "1, 2");
        assert_eq!(join_ids(&[]), "—");
    }
}
