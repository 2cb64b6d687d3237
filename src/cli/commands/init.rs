use crate::cli::commands::activity_helpers::{Activity, log_activity};
use crate::cli::commands::shared::Globals;
use crate::cli::{context, output};
use crate::config::app_config::{ActivitySection, AppConfig};
use crate::core::errors::{IssueLensError, Result};
use crate::core::models::activity_entry::ActivityAction;
use crate::core::models::window::TimeWindow;

/// Execute the `issuelens init` command.
///
/// Creates the config directory with a `config.toml` holding every
/// default, seeded with `--api-url` and `--window` when given.
pub fn execute(globals: &Globals) -> Result<()> {
    let dir = context::config_dir();

    if dir.exists() {
        return Err(IssueLensError::InvalidConfig {
            detail: format!(
                "issuelens is already initialized here ({} exists)",
                dir.display()
            ),
        });
    }

    output::header("issuelens — Initializing");

    let mut config = AppConfig {
        activity: Some(ActivitySection::default()),
        ..AppConfig::default()
    };
    if let Some(url) = &globals.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(window) = &globals.window {
        let window: TimeWindow = window.parse()?;
        config.issuelens.default_window = window.code().to_string();
    }

    std::fs::create_dir_all(dir)?;
    output::success(&format!("Created {}/", dir.display()));

    std::fs::write(dir.join("config.toml"), config.to_toml()?)?;
    output::success("Generated config.toml with defaults");

    if config.api_base_url().is_none() {
        output::warning("No backend configured. Set [api].base_url or pass --events <file>.");
    }

    log_activity(
        &config,
        Activity::new(ActivityAction::Init).detail("config initialized"),
    );

    Ok(())
}
