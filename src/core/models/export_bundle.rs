use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::IssueLensError;
use crate::core::models::event::EventRecord;
use crate::core::models::window::TimeWindow;

/// Column that can be selected for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportField {
    ExceptionType,
    ExceptionMessage,
    Severity,
    PathLine,
    Function,
    Timestamp,
    OperationSystem,
    PythonVersion,
}

impl ExportField {
    pub const ALL: [ExportField; 8] = [
        ExportField::ExceptionType,
        ExportField::ExceptionMessage,
        ExportField::Severity,
        ExportField::PathLine,
        ExportField::Function,
        ExportField::Timestamp,
        ExportField::OperationSystem,
        ExportField::PythonVersion,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ExportField::ExceptionType => "exception_type",
            ExportField::ExceptionMessage => "exception_message",
            ExportField::Severity => "severity",
            ExportField::PathLine => "path_line",
            ExportField::Function => "function",
            ExportField::Timestamp => "timestamp",
            ExportField::OperationSystem => "operation_system",
            ExportField::PythonVersion => "python_version",
        }
    }

    /// Value of this column for `event`, `Null` when the record lacks it.
    pub fn extract(self, event: &EventRecord) -> serde_json::Value {
        let text = match self {
            ExportField::ExceptionType => event.kind.clone(),
            ExportField::ExceptionMessage => event.value.clone(),
            ExportField::Severity => event.severity_tag().map(str::to_string),
            ExportField::PathLine => event.location(),
            ExportField::Function => event.function.clone(),
            ExportField::Timestamp => Some(event.timestamp.to_rfc3339()),
            ExportField::OperationSystem => event.platform.clone(),
            ExportField::PythonVersion => event.runtime(),
        };
        text.map(serde_json::Value::String)
            .unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for ExportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ExportField {
    type Err = IssueLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ExportField::ALL
            .into_iter()
            .find(|f| f.key() == wanted)
            .ok_or_else(|| IssueLensError::InvalidField {
                value: s.to_string(),
                available: ExportField::ALL.map(ExportField::key).join(", "),
            })
    }
}

/// File written by `issuelens export`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportBundle {
    pub generated_at: chrono::DateTime<chrono::FixedOffset>,
    pub period: TimeWindow,
    pub projects: Vec<String>,
    pub fields: Vec<ExportField>,
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
}

type Row = serde_json::Map<String, serde_json::Value>;

/// Shapes accepted by `issuelens import`.
///
/// Rows stay untyped until `into_records`, so that both raw event records
/// and the projected rows `export` writes can be read back.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImportPayload {
    Records(Vec<Row>),
    Wrapped { data: Vec<Row> },
}

impl ImportPayload {
    /// Convert every row into an event record, failing on the first row
    /// that cannot be read.
    pub fn into_records(self) -> Result<Vec<EventRecord>, IssueLensError> {
        let rows = match self {
            ImportPayload::Records(rows) => rows,
            ImportPayload::Wrapped { data } => data,
        };
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| {
                record_from_row(row).map_err(|reason| IssueLensError::ImportRejected {
                    reason: format!("row {}: {reason}", i + 1),
                })
            })
            .collect()
    }
}

/// Map export column names back onto record fields and parse the row.
///
/// `project_uuid` may be absent: import assigns its own.
fn record_from_row(mut row: Row) -> Result<EventRecord, String> {
    use serde_json::Value;

    for (column, field) in [
        ("exception_type", "type"),
        ("exception_message", "value"),
        ("operation_system", "platform"),
    ] {
        if let Some(v) = row.remove(column) {
            row.entry(field).or_insert(v);
        }
    }
    if let Some(Value::String(loc)) = row.remove(ExportField::PathLine.key()) {
        let (file, line) = split_location(&loc);
        if let Some(file) = file {
            row.entry("filename").or_insert(Value::String(file));
        }
        if let Some(line) = line {
            row.entry("lineno").or_insert(Value::from(line));
        }
    }
    if let Some(Value::String(runtime)) = row.remove(ExportField::PythonVersion.key()) {
        let mut parts = runtime.splitn(2, ' ');
        if let Some(name) = parts.next().filter(|n| !n.is_empty()) {
            row.entry("runtime_name").or_insert(Value::String(name.to_string()));
        }
        if let Some(version) = parts.next() {
            row.entry("runtime_version").or_insert(Value::String(version.to_string()));
        }
    }

    if row.get("timestamp").is_none_or(Value::is_null) {
        return Err("no timestamp (export with the 'timestamp' field to re-import)".into());
    }
    if row.get("project_uuid").is_none_or(Value::is_null) {
        row.insert("project_uuid".into(), Value::String(String::new()));
    }

    serde_json::from_value(Value::Object(row)).map_err(|e| e.to_string())
}

/// Inverse of `EventRecord::location`: `file:line`, `file` or `line N`.
fn split_location(loc: &str) -> (Option<String>, Option<u32>) {
    if let Some(line) = loc.strip_prefix("line ").and_then(|l| l.parse().ok()) {
        return (None, Some(line));
    }
    match loc.rsplit_once(':') {
        Some((file, line)) => match line.parse() {
            Ok(n) => (Some(file.to_string()), Some(n)),
            Err(_) => (Some(loc.to_string()), None),
        },
        None => (Some(loc.to_string()), None),
    }
}
