use std::path::PathBuf;

use crate::cli::commands::activity_helpers::{Activity, log_activity};
use crate::cli::commands::shared::Globals;
use crate::cli::output;
use crate::core::errors::{IssueLensError, Result};
use crate::core::models::activity_entry::ActivityAction;
use crate::core::models::export_bundle::ExportField;
use crate::core::services::analytics_service::AnalyticsService;
use crate::core::services::transfer_service::TransferService;

/// Execute the `issuelens export` command.
///
/// Writes the filtered events, projected onto the chosen fields, as one
/// pretty-printed JSON bundle.
pub fn execute(globals: &Globals, output_path: Option<&str>, fields: &[String]) -> Result<()> {
    let config = globals.config()?;
    let fields: Vec<ExportField> = if fields.is_empty() {
        config.export_fields()?
    } else {
        fields
            .iter()
            .map(|f| f.parse::<ExportField>())
            .collect::<Result<_>>()?
    };

    let now = globals.now()?;
    let filter = globals.filter(&config)?;
    let events = globals.fetch_events(&config)?;
    let filtered = AnalyticsService::new(now, &config.issuelens.unknown_label).filtered(&events, &filter);

    let transfer = TransferService;
    let bundle = transfer.build_export(&filtered, &filter, &fields, now);

    let path = match output_path {
        Some(p) => PathBuf::from(p),
        None => {
            let name = TransferService::export_file_name(&now);
            match &config.export.directory {
                Some(dir) => PathBuf::from(dir).join(name),
                None => PathBuf::from(name),
            }
        }
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&bundle).map_err(|e| IssueLensError::InvalidConfig {
        detail: format!("Failed to serialize export: {e}"),
    })?;
    std::fs::write(&path, json + "\n")?;

    output::success(&format!(
        "Exported {} events ({} fields, {}) to {}",
        bundle.data.len(),
        bundle.fields.len(),
        filter.window.label(),
        path.display()
    ));

    let mut activity = Activity::new(ActivityAction::Export)
        .file(path.display().to_string())
        .detail(format!("{} events, window {}", bundle.data.len(), filter.window));
    if filter.projects.len() == 1
        && let Some(project) = filter.projects.first()
    {
        activity = activity.project(project);
    }
    log_activity(&config, activity);

    Ok(())
}
