use chrono::Utc;

use crate::adapters::activity::json_activity_log::JsonActivityLog;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::models::activity_entry::{ActivityAction, ActivityEntry};
use crate::core::traits::activity::ActivityLog;

/// Details of one operation to record.
pub struct Activity {
    pub action: ActivityAction,
    pub project: Option<String>,
    pub files: Vec<String>,
    pub detail: Option<String>,
    pub ok: bool,
}

impl Activity {
    pub fn new(action: ActivityAction) -> Self {
        Self {
            action,
            project: None,
            files: vec![],
            detail: None,
            ok: true,
        }
    }

    pub fn project(mut self, project: &str) -> Self {
        self.project = Some(project.to_string());
        self
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn failed(mut self) -> Self {
        self.ok = false;
        self
    }
}

/// Record an operation. Warns on failure instead of propagating the
/// error, since logging must not block the operation itself.
///
/// Nothing is written when the config directory does not exist yet:
/// read-only use without `init` leaves no trace on disk.
pub fn log_activity(config: &AppConfig, activity: Activity) {
    let dir = context::config_dir();
    if !dir.exists() {
        return;
    }

    let section = config.activity.as_ref();
    if !JsonActivityLog::is_enabled(section) {
        return;
    }

    let log = JsonActivityLog::from_config(dir, section);
    let entry = ActivityEntry {
        timestamp: Utc::now(),
        action: activity.action,
        project: activity.project,
        files: activity.files,
        detail: activity.detail,
        ok: activity.ok,
    };

    if let Err(e) = log.record(&entry) {
        output::warning(&format!("Could not write activity log: {e}"));
    }
}
