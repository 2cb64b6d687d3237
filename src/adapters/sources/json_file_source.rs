use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::errors::{IssueLensError, Result};
use crate::core::models::event::EventRecord;
use crate::core::traits::event_source::EventSource;

/// Event collection stored as a JSON array on disk.
///
/// The file has the shape `GET /api/events` returns, so a saved API
/// response can be pointed at directly. `import` writes back through
/// `save`.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Like `fetch_events`, but a missing file is an empty store.
    pub fn load_or_empty(&self) -> Result<Vec<EventRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        self.fetch_events()
    }

    /// Overwrite the file with `events`, pretty-printed.
    pub fn save(&self, events: &[EventRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(events).map_err(|e| IssueLensError::ParseError {
            file: self.path.clone(),
            detail: e.to_string(),
        })?;
        std::fs::write(&self.path, json + "\n")?;
        Ok(())
    }
}

impl EventSource for JsonFileSource {
    fn fetch_events(&self) -> Result<Vec<EventRecord>> {
        if !self.path.exists() {
            return Err(IssueLensError::FileNotFound {
                path: self.path.clone(),
            });
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let events: Vec<EventRecord> =
            serde_json::from_str(&content).map_err(|e| IssueLensError::ParseError {
                file: self.path.clone(),
                detail: e.to_string(),
            })?;
        debug!(count = events.len(), path = %self.path.display(), "loaded events");
        Ok(events)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
