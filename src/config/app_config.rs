use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::errors::{IssueLensError, Result};
use crate::core::models::export_bundle::ExportField;
use crate::core::models::window::TimeWindow;

/// Top-level configuration read from `.issuelens/config.toml`.
///
/// Every section has defaults, so a partial file (or none at all) still
/// yields a usable config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub issuelens: IssueLensSection,
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub export: ExportSection,
    pub activity: Option<ActivitySection>,
}

impl AppConfig {
    /// Load the configuration from `{dir}/config.toml`.
    ///
    /// After parsing, validates the default window, export fields and the
    /// activity log filename, which must not escape the config directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join("config.toml");
        if !config_path.exists() {
            return Err(IssueLensError::InvalidConfig {
                detail: format!(
                    "{} not found. Run 'issuelens init' first.",
                    config_path.display()
                ),
            });
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config = Self::parse(&content)?;
        debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Like `load`, but a missing file yields the built-in defaults.
    /// A file that exists and is malformed is still an error.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        if !dir.join("config.toml").exists() {
            debug!(dir = %dir.display(), "no config found, using defaults");
            return Ok(Self::default());
        }
        Self::load(dir)
    }

    /// Parse and validate a config document.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| IssueLensError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if config.issuelens.format_version > CURRENT_FORMAT_VERSION {
            return Err(IssueLensError::FormatVersionTooNew {
                project_version: config.issuelens.format_version,
                supported_version: CURRENT_FORMAT_VERSION,
            });
        }

        config.default_window()?;
        config.export_fields()?;

        if let Some(activity) = &config.activity {
            crate::cli::context::validate_simple_filename(&activity.log_file, "activity log file")?;
        }

        Ok(config)
    }

    /// Render as TOML for `init`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| IssueLensError::InvalidConfig {
            detail: format!("Failed to serialize config: {e}"),
        })
    }

    pub fn default_window(&self) -> Result<TimeWindow> {
        self.issuelens.default_window.parse()
    }

    /// Configured export fields; an empty list means all of them.
    pub fn export_fields(&self) -> Result<Vec<ExportField>> {
        if self.export.fields.is_empty() {
            return Ok(ExportField::ALL.to_vec());
        }
        self.export
            .fields
            .iter()
            .map(|f| f.parse::<ExportField>())
            .collect()
    }

    /// The API base URL, if one is configured.
    pub fn api_base_url(&self) -> Option<&str> {
        let url = self.api.base_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

/// Current format version supported by this build.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// The `[issuelens]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueLensSection {
    #[serde(default = "default_version")]
    pub version: String,
    /// Format version for backward compatibility. Defaults to 1 if missing.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(default = "default_window_code")]
    pub default_window: String,
    /// Label for events missing the grouped field.
    #[serde(default = "default_unknown_label")]
    pub unknown_label: String,
}

impl Default for IssueLensSection {
    fn default() -> Self {
        Self {
            version: default_version(),
            format_version: default_format_version(),
            default_window: default_window_code(),
            unknown_label: default_unknown_label(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_format_version() -> u32 {
    1
}

fn default_window_code() -> String {
    TimeWindow::default().code().to_string()
}

fn default_unknown_label() -> String {
    "Unknown".to_string()
}

/// The `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    /// Empty means "not configured".
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            session_cookie: default_session_cookie(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_session_cookie() -> String {
    "session".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// The `[export]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportSection {
    #[serde(default)]
    pub fields: Vec<String>,
    /// Where `export` writes when no `--output` is given.
    pub directory: Option<String>,
}

/// The `[activity]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySection {
    pub enabled: bool,
    pub log_file: String,
}

impl ActivitySection {
    pub const DEFAULT_LOG_FILE: &'static str = "activity.log";
}

impl Default for ActivitySection {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: Self::DEFAULT_LOG_FILE.to_string(),
        }
    }
}
