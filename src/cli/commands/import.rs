use std::path::Path;

use tracing::info;

use crate::adapters::sources::json_file_source::JsonFileSource;
use crate::cli::commands::activity_helpers::{Activity, log_activity};
use crate::cli::commands::shared::Globals;
use crate::cli::output;
use crate::core::errors::{IssueLensError, Result};
use crate::core::models::activity_entry::ActivityAction;
use crate::core::services::project_service::ProjectService;
use crate::core::services::transfer_service::TransferService;

/// Execute the `issuelens import <file>` command.
///
/// Appends the file's events to the `--events` store, assigned to the
/// one `--project` given. Events whose uuid is already stored are skipped.
pub fn execute(globals: &Globals, file: &str) -> Result<()> {
    let config = globals.config()?;

    let store_path = globals
        .events
        .as_deref()
        .ok_or_else(|| IssueLensError::ImportRejected {
            reason: "import writes to a local store; pass --events <store.json>".into(),
        })?;
    let project = match globals.projects.as_slice() {
        [one] if !one.trim().is_empty() => one.trim(),
        _ => {
            return Err(IssueLensError::ImportRejected {
                reason: "pass exactly one --project <uuid> to assign the events to".into(),
            });
        }
    };

    let transfer = TransferService;
    let path = Path::new(file);
    transfer.validate_import_file(path)?;
    let incoming = transfer.parse_import(&std::fs::read_to_string(path)?)?;

    let store = JsonFileSource::new(store_path);
    let mut events = store.load_or_empty()?;
    let title = ProjectService
        .unique_projects(&events)
        .into_iter()
        .find(|p| p.uuid == project)
        .map(|p| p.title);

    let (imported, skipped) = transfer.merge_into(&mut events, incoming, project, title.as_deref());
    if imported > 0 {
        store.save(&events)?;
    }
    info!(imported, skipped, store = %store.path().display(), "import finished");

    output::success(&format!(
        "Imported {imported} events into {} ({project})",
        store.path().display()
    ));
    if skipped > 0 {
        output::warning(&format!("Skipped {skipped} events already in the store"));
    }

    log_activity(
        &config,
        Activity::new(ActivityAction::Import)
            .project(project)
            .file(file)
            .detail(format!("{imported} imported, {skipped} skipped")),
    );

    Ok(())
}
