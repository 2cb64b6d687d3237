use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::errors::IssueLensError;
use crate::core::models::event::EventRecord;

/// One slice of a proportional (pie) breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub name: String,
    pub value: u64,
}

/// Fixed tiering applied to the raw severity tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityTier {
    High,
    Medium,
    Low,
    Unclassified,
}

impl SeverityTier {
    /// `critical`/`high` → High, `medium` → Medium, `low`/`info` → Low.
    /// Anything else, including a missing tag, is Unclassified.
    pub fn classify(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return SeverityTier::Unclassified;
        };
        match tag.trim().to_ascii_lowercase().as_str() {
            "critical" | "high" => SeverityTier::High,
            "medium" => SeverityTier::Medium,
            "low" | "info" => SeverityTier::Low,
            _ => SeverityTier::Unclassified,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeverityTier::High => "high",
            SeverityTier::Medium => "medium",
            SeverityTier::Low => "low",
            SeverityTier::Unclassified => "unclassified",
        }
    }
}

/// Counter cards shown above the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityStats {
    pub total: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub unclassified: u64,
}

/// Categorical dimension a summary can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    Severity,
    #[default]
    Server,
    Platform,
    Level,
    Kind,
    Project,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Severity,
        Dimension::Server,
        Dimension::Platform,
        Dimension::Level,
        Dimension::Kind,
        Dimension::Project,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Dimension::Severity => "severity",
            Dimension::Server => "server",
            Dimension::Platform => "platform",
            Dimension::Level => "level",
            Dimension::Kind => "type",
            Dimension::Project => "project",
        }
    }

    /// Label `event` falls under. Missing or blank values become
    /// `fallback`; severity always resolves to a tier label.
    pub fn label_of(self, event: &EventRecord, fallback: &str) -> String {
        let raw = match self {
            Dimension::Severity => {
                return SeverityTier::classify(event.severity_tag())
                    .label()
                    .to_string();
            }
            Dimension::Server => event.server_name.as_deref(),
            Dimension::Platform => event.platform.as_deref(),
            Dimension::Level => event.level.as_deref(),
            Dimension::Kind => event.kind.as_deref(),
            Dimension::Project => event
                .project_title
                .as_deref()
                .or(Some(event.project_uuid.as_str())),
        };
        raw.filter(|s| !s.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Dimension {
    type Err = IssueLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Dimension::ALL
            .into_iter()
            .find(|d| d.code() == wanted)
            .ok_or_else(|| IssueLensError::InvalidField {
                value: s.to_string(),
                available: Dimension::ALL.map(Dimension::code).join(", "),
            })
    }
}
