use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::errors::{IssueLensError, Result};

static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

const DEFAULT_DIR: &str = ".issuelens";

/// Initialize the global config directory path.
/// If `custom` is provided, uses that path; otherwise defaults to `.issuelens`.
pub fn init(custom: Option<&str>) {
    let dir = custom
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));
    let _ = CONFIG_DIR.set(dir);
}

/// Get the current config directory path.
pub fn config_dir() -> &'static Path {
    CONFIG_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(DEFAULT_DIR))
}

/// Reject anything but a bare file name, so config values cannot point
/// outside the config directory.
pub fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name == "."
        || name == ".."
        || name.contains('\0');
    if invalid {
        return Err(IssueLensError::InvalidConfig {
            detail: format!("Invalid {what} '{name}': must be a plain file name"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass() {
        assert!(validate_simple_filename("activity.log", "log").is_ok());
        assert!(validate_simple_filename("my-log.jsonl", "log").is_ok());
    }

    #[test]
    fn traversal_is_rejected() {
        for bad in ["../x", "a/b", "..\\x", "..", "", "  "] {
            assert!(validate_simple_filename(bad, "log").is_err(), "{bad}");
        }
    }
}
