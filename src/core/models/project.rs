use serde::{Deserialize, Serialize};

use crate::core::errors::{IssueLensError, Result};

/// Entry of the project picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRef {
    pub uuid: String,
    pub title: String,
}

impl ProjectRef {
    /// Label used when a record carries no project title.
    pub fn fallback_title(uuid: &str) -> String {
        let prefix: String = uuid.chars().take(4).collect();
        format!("Project {prefix}")
    }
}

/// A project registered on the backend (`GET /api/projects/`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteProject {
    pub uuid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /api/projects/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
}

impl NewProject {
    pub fn new(title: &str, description: Option<&str>) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(IssueLensError::InvalidInput {
                detail: "project title must not be empty".into(),
            });
        }
        Ok(Self {
            title: title.to_string(),
            description: description.map(str::trim).unwrap_or_default().to_string(),
        })
    }
}
