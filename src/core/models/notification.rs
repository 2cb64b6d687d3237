use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::{IssueLensError, Result};

/// Delivery channel of a notification integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Webhook,
    Mattermost,
    Slack,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 3] = [
        NotificationKind::Webhook,
        NotificationKind::Mattermost,
        NotificationKind::Slack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Webhook => "webhook",
            NotificationKind::Mattermost => "mattermost",
            NotificationKind::Slack => "slack",
        }
    }

    /// Only Mattermost hooks take a channel and a bot username.
    pub fn takes_channel(self) -> bool {
        self == NotificationKind::Mattermost
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = IssueLensError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        NotificationKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| IssueLensError::InvalidInput {
                detail: format!(
                    "unknown notification kind '{s}' (expected one of: {})",
                    NotificationKind::ALL.map(NotificationKind::as_str).join(", ")
                ),
            })
    }
}

/// A configured integration, as listed by `GET /api/notifications/`.
///
/// `kind` stays a string: the backend stores whatever it was given.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub project_uuid: Option<String>,
}

/// Body of `POST /api/notifications/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNotification {
    pub project_uuid: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub url: String,
    pub channel: Option<String>,
    pub username: Option<String>,
}

impl NewNotification {
    /// Check the request before it is sent.
    ///
    /// The title and project must be non-blank and the url must be
    /// http(s). `channel` and `username` are refused for kinds that
    /// ignore them.
    pub fn validate(&self) -> Result<()> {
        let invalid = |detail: String| Err(IssueLensError::InvalidInput { detail });

        if self.project_uuid.trim().is_empty() {
            return invalid("notification needs a project uuid".into());
        }
        if self.title.trim().is_empty() {
            return invalid("notification title must not be empty".into());
        }
        let url = self.url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return invalid(format!("webhook url must start with http:// or https:// (got '{url}')"));
        }
        if !self.kind.takes_channel() && (self.channel.is_some() || self.username.is_some()) {
            return invalid(format!(
                "--channel and --username only apply to mattermost, not {}",
                self.kind
            ));
        }
        Ok(())
    }
}
