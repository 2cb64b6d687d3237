use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::app_config::ActivitySection;
use crate::core::errors::{IssueLensError, Result};
use crate::core::models::activity_entry::{ActivityAction, ActivityEntry};
use crate::core::traits::activity::ActivityLog;

/// Append-only JSON-lines file under the config directory.
pub struct JsonActivityLog {
    log_path: PathBuf,
}

fn log_error(detail: String) -> IssueLensError {
    IssueLensError::ActivityLogError { detail }
}

impl JsonActivityLog {
    pub fn new(config_dir: &Path, log_file: &str) -> Self {
        Self {
            log_path: config_dir.join(log_file),
        }
    }

    /// Log at the configured file name, or `activity.log`.
    pub fn from_config(config_dir: &Path, section: Option<&ActivitySection>) -> Self {
        let log_file = section.map_or(ActivitySection::DEFAULT_LOG_FILE, |a| a.log_file.as_str());
        Self::new(config_dir, log_file)
    }

    /// Recording is on unless the config turns it off.
    pub fn is_enabled(section: Option<&ActivitySection>) -> bool {
        section.is_none_or(|a| a.enabled)
    }
}

impl ActivityLog for JsonActivityLog {
    /// One entry per line, written with a single `write_all` so that two
    /// processes appending at once do not interleave within a line.
    fn record(&self, entry: &ActivityEntry) -> Result<()> {
        let mut line = serde_json::to_vec(entry)
            .map_err(|e| log_error(format!("Failed to serialize activity entry: {e}")))?;
        line.push(b'\n');

        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| log_error(format!("Cannot append to {}: {e}", self.log_path.display())))
    }

    fn query(
        &self,
        action: Option<ActivityAction>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ActivityEntry>> {
        let content = match fs::read_to_string(&self.log_path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(log_error(format!("Cannot read activity log: {e}"))),
        };

        let mut entries = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry: ActivityEntry = serde_json::from_str(line)
                .map_err(|e| log_error(format!("Malformed activity entry at line {}: {e}", idx + 1)))?;
            if entry.matches(action, since) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(action: ActivityAction) -> ActivityEntry {
        ActivityEntry {
            timestamp: Utc::now(),
            action,
            project: Some("p1".to_string()),
            files: vec![],
            detail: None,
            ok: true,
        }
    }

    #[test]
    fn writes_one_line_per_entry() {
        let tmp = TempDir::new().unwrap();
        let log = JsonActivityLog::new(tmp.path(), "activity.log");

        log.record(&entry(ActivityAction::Init)).unwrap();
        log.record(&entry(ActivityAction::MemberAdd)).unwrap();

        let raw = std::fs::read_to_string(tmp.path().join("activity.log")).unwrap();
        assert_eq!(raw.lines().count(), 2);
        assert!(raw.lines().nth(1).unwrap().contains("\"action\":\"member_add\""));
    }

    #[test]
    fn query_applies_action_filter() {
        let tmp = TempDir::new().unwrap();
        let log = JsonActivityLog::new(tmp.path(), "activity.log");
        for action in [ActivityAction::Export, ActivityAction::Import, ActivityAction::Export] {
            log.record(&entry(action)).unwrap();
        }

        assert_eq!(log.query(None, None).unwrap().len(), 3);
        assert_eq!(log.query(Some(ActivityAction::Export), None).unwrap().len(), 2);
    }

    #[test]
    fn blank_lines_are_skipped_and_bad_lines_reported() {
        let tmp = TempDir::new().unwrap();
        let log = JsonActivityLog::new(tmp.path(), "activity.log");
        log.record(&entry(ActivityAction::Init)).unwrap();

        let path = tmp.path().join("activity.log");
        let mut raw = std::fs::read_to_string(&path).unwrap();
        raw.push('\n');
        std::fs::write(&path, &raw).unwrap();
        assert_eq!(log.query(None, None).unwrap().len(), 1);

        raw.push_str("{not json}\n");
        std::fs::write(&path, raw).unwrap();
        let err = log.query(None, None).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let log = JsonActivityLog::new(Path::new("/nonexistent"), "activity.log");
        assert!(log.query(None, None).unwrap().is_empty());
    }

    #[test]
    fn record_creates_config_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".issuelens");
        JsonActivityLog::new(&dir, "activity.log")
            .record(&entry(ActivityAction::Init))
            .unwrap();
        assert!(dir.join("activity.log").is_file());
    }

    #[test]
    fn config_section_controls_file_and_switch() {
        let section = ActivitySection {
            enabled: false,
            log_file: "ops.log".to_string(),
        };
        assert!(JsonActivityLog::is_enabled(None));
        assert!(!JsonActivityLog::is_enabled(Some(&section)));

        let tmp = TempDir::new().unwrap();
        let log = JsonActivityLog::from_config(tmp.path(), Some(&section));
        log.record(&entry(ActivityAction::Init)).unwrap();
        assert!(tmp.path().join("ops.log").is_file());
    }
}
