use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mutating operations that get recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Init,
    MemberAdd,
    MemberRemove,
    ProjectCreate,
    ProjectDelete,
    NotificationAdd,
    NotificationRemove,
    Export,
    Import,
}

impl ActivityAction {
    pub const ALL: [ActivityAction; 9] = [
        ActivityAction::Init,
        ActivityAction::MemberAdd,
        ActivityAction::MemberRemove,
        ActivityAction::ProjectCreate,
        ActivityAction::ProjectDelete,
        ActivityAction::NotificationAdd,
        ActivityAction::NotificationRemove,
        ActivityAction::Export,
        ActivityAction::Import,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityAction::Init => "init",
            ActivityAction::MemberAdd => "member_add",
            ActivityAction::MemberRemove => "member_remove",
            ActivityAction::ProjectCreate => "project_create",
            ActivityAction::ProjectDelete => "project_delete",
            ActivityAction::NotificationAdd => "notification_add",
            ActivityAction::NotificationRemove => "notification_remove",
            ActivityAction::Export => "export",
            ActivityAction::Import => "import",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry in the activity log (JSON lines format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub action: ActivityAction,
    /// Project the operation targeted, when there is one.
    pub project: Option<String>,
    /// Files read or written.
    pub files: Vec<String>,
    pub detail: Option<String>,
    /// Whether the operation reached its goal.
    pub ok: bool,
}

impl ActivityEntry {
    /// Whether the entry passes the `log --action/--since` filters.
    pub fn matches(&self, action: Option<ActivityAction>, since: Option<DateTime<Utc>>) -> bool {
        action.is_none_or(|a| a == self.action) && since.is_none_or(|t| self.timestamp >= t)
    }
}
