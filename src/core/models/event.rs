use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::errors::{IssueLensError, Result};

/// One reported application error, as returned by `GET /api/events`.
///
/// Records are read-only facts: the pipeline borrows them and never
/// rewrites a field. Only `import` creates modified copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub uuid: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub project_uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abs_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineno: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_build: Option<String>,
}

impl EventRecord {
    /// Minimal record; everything except identity and time left empty.
    #[cfg(test)]
    pub fn new(uuid: &str, timestamp: DateTime<Utc>, project_uuid: &str) -> Self {
        Self {
            uuid: uuid.to_string(),
            timestamp,
            project_uuid: project_uuid.to_string(),
            project_title: None,
            severity: None,
            level: None,
            kind: None,
            value: None,
            filename: None,
            abs_path: None,
            lineno: None,
            start_line: None,
            function: None,
            context: None,
            module: None,
            platform: None,
            server_name: None,
            runtime_name: None,
            runtime_version: None,
            runtime_build: None,
        }
    }

    /// The tag used for severity tiering: `severity` when the backend
    /// sends one, otherwise the raw `level`.
    pub fn severity_tag(&self) -> Option<&str> {
        let non_empty = |s: &&str| !s.is_empty();
        self.severity
            .as_deref()
            .filter(non_empty)
            .or_else(|| self.level.as_deref().filter(non_empty))
    }

    /// `filename:lineno`, or whichever half is known.
    pub fn location(&self) -> Option<String> {
        let file = self.filename.as_deref().or(self.abs_path.as_deref());
        match (file, self.lineno) {
            (Some(f), Some(l)) => Some(format!("{f}:{l}")),
            (Some(f), None) => Some(f.to_string()),
            (None, Some(l)) => Some(format!("line {l}")),
            (None, None) => None,
        }
    }

    /// `runtime_name runtime_version`, e.g. `CPython 3.12.1`.
    pub fn runtime(&self) -> Option<String> {
        match (self.runtime_name.as_deref(), self.runtime_version.as_deref()) {
            (Some(n), Some(v)) => Some(format!("{n} {v}")),
            (Some(n), None) => Some(n.to_string()),
            (None, Some(v)) => Some(v.to_string()),
            (None, None) => None,
        }
    }
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339, a naive ISO datetime (read as UTC), or a bare date
/// (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| IssueLensError::InvalidTimestamp {
            value: raw.to_string(),
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
