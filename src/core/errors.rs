use std::path::PathBuf;

/// All domain errors for issuelens.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum IssueLensError {
    #[error(
        "File not found: {path}\n\n  \
         Check that the path is correct and the file exists."
    )]
    FileNotFound { path: PathBuf },

    #[error(
        "Parse error in {file}: {detail}\n\n  \
         Expected a JSON array of event records, e.g.\n    \
         [{{\"timestamp\": \"2024-01-01T10:00:00Z\", \"project_uuid\": \"...\"}}]"
    )]
    ParseError { file: PathBuf, detail: String },

    #[error(
        "Invalid timestamp: '{value}'\n\n  \
         Accepted formats:\n    \
         → RFC 3339:   2024-01-05T12:00:00+03:00\n    \
         → ISO naive:  2024-01-05T12:00:00 (read as UTC)\n    \
         → Date only:  2024-01-05 (midnight UTC)"
    )]
    InvalidTimestamp { value: String },

    #[error("Invalid time window '{value}'. Expected one of: 1d, 14d, 1m, all")]
    InvalidWindow { value: String },

    #[error("Unknown field '{value}'. Available fields: {available}")]
    InvalidField { value: String, available: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Invalid input: {detail}")]
    InvalidInput { detail: String },

    #[error(
        "No event source available\n\n  \
         Solutions:\n    \
         → Read a local file: issuelens --events events.json <command>\n    \
         → Point at a backend: issuelens --api-url http://127.0.0.1:8039 <command>\n    \
         → Or set [api].base_url in .issuelens/config.toml"
    )]
    NoEventSource,

    #[error("Request to {endpoint} failed: {reason}")]
    ApiRequestFailed { endpoint: String, reason: String },

    #[error(
        "Not authenticated against {endpoint}\n\n  \
         Your session is missing or expired.\n\n  \
         Solutions:\n    \
         → Pass a session: issuelens --session <cookie-value> ...\n    \
         → Or export ISSUELENS_SESSION=<cookie-value>"
    )]
    Unauthorized { endpoint: String },

    #[error(
        "Role '{role}' is not allowed to {action}\n\n  \
         Required role: one of {required}"
    )]
    Forbidden {
        role: String,
        action: String,
        required: String,
    },

    #[error(
        "Membership sync incomplete: {failed} of {attempted} calls failed\n\n  \
         The server state may differ from what you requested.\n  \
         Re-running the same sync is safe: add/remove calls are idempotent."
    )]
    MembershipSyncIncomplete { failed: usize, attempted: usize },

    #[error(
        "No event with uuid '{uuid}'\n\n  \
         Run 'issuelens issues --window all' to list known events."
    )]
    EventNotFound { uuid: String },

    #[error(
        "No project with uuid '{uuid}' on the backend\n\n  \
         Run 'issuelens projects list' to see registered projects."
    )]
    ProjectNotFound { uuid: String },

    #[error(
        "No notification with id {id}\n\n  \
         Run 'issuelens notifications list' to see configured integrations."
    )]
    NotificationNotFound { id: i64 },

    #[error("Import rejected: {reason}")]
    ImportRejected { reason: String },

    #[error("Activity log error: {detail}")]
    ActivityLogError { detail: String },

    #[error(
        "This project uses format version {project_version}, but your issuelens \
         only supports up to version {supported_version}.\n\n  \
         Solution:\n    \
         → Install the latest issuelens: cargo install issuelens --force"
    )]
    FormatVersionTooNew {
        project_version: u32,
        supported_version: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IssueLensError>;
