pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

use crate::core::models::member::UserId;

/// Issue analytics, project membership and bulk transfer for an
/// error-monitoring backend.
#[derive(Parser, Debug)]
#[command(name = "issuelens", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Read events from a local JSON file instead of the backend
    #[arg(long, global = true)]
    pub events: Option<String>,

    /// Backend base URL, e.g. http://127.0.0.1:8039
    #[arg(long, global = true, env = "ISSUELENS_API_URL")]
    pub api_url: Option<String>,

    /// Session cookie value for the backend
    #[arg(long, global = true, env = "ISSUELENS_SESSION", hide_env_values = true)]
    pub session: Option<String>,

    /// Reference time (RFC 3339). Defaults to the current local time
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Time window: 1d, 14d, 1m or all
    #[arg(long, global = true)]
    pub window: Option<String>,

    /// Restrict to a project uuid. Repeat for several: --project a --project b
    #[arg(long, global = true)]
    pub project: Vec<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to alternative config directory
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .issuelens/ with a default config
    Init,

    /// List events in the current window
    Issues {
        /// Only show events with this level/severity tag
        #[arg(long)]
        level: Option<String>,
        /// Show the N most recent events
        #[arg(long)]
        last: Option<usize>,
    },

    /// Show every field of one event
    Show {
        /// Event uuid
        uuid: String,
    },

    /// Counters plus severity and dimension breakdowns
    Stats {
        /// Secondary breakdown: severity, server, platform, level, type, project
        #[arg(long)]
        by: Option<String>,
        /// Print the full view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Daily event counts over the window
    Series {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Projects present in the event collection, or manage the
    /// backend's project registry with a subcommand
    Projects {
        #[command(subcommand)]
        action: Option<ProjectsAction>,
    },

    /// Inspect and synchronize project members
    Members {
        #[command(subcommand)]
        action: MembersAction,
    },

    /// Manage webhook, Slack and Mattermost integrations
    Notifications {
        #[command(subcommand)]
        action: NotificationsAction,
    },

    /// Export filtered events to a JSON bundle
    Export {
        /// Output file (default: errors_export_<date>.json)
        #[arg(long, short)]
        output: Option<String>,
        /// Comma-separated fields to include (default: all)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
    },

    /// Import events into the local store given by --events.
    /// Every record is assigned to the single --project given
    Import {
        /// JSON file to import
        file: String,
    },

    /// Show the activity log
    Log {
        /// Filter by action
        #[arg(long, value_parser = [
            "init", "member_add", "member_remove", "project_create", "project_delete",
            "notification_add", "notification_remove", "export", "import",
        ])]
        action: Option<String>,
        /// Filter entries since this date (ISO 8601)
        #[arg(long)]
        since: Option<String>,
        /// Show last N entries
        #[arg(long)]
        last: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MembersAction {
    /// List the members of a project
    List {
        /// Project uuid
        project: String,
    },
    /// List every user on the backend (admins and project managers)
    Users,
    /// Compare two member id lists offline
    Diff {
        /// Current member ids, comma-separated
        #[arg(long, value_delimiter = ',')]
        current: Vec<UserId>,
        /// Desired member ids, comma-separated
        #[arg(long, value_delimiter = ',')]
        desired: Vec<UserId>,
    },
    /// Make a project's members match the desired list
    Sync {
        /// Project uuid
        project: String,
        /// Desired member ids, comma-separated
        #[arg(long, value_delimiter = ',', required = true)]
        desired: Vec<UserId>,
        /// Print the planned changes without applying them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectsAction {
    /// List projects registered on the backend
    List,
    /// Register a new project
    Create {
        /// Project title
        title: String,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a project from the backend
    Delete {
        /// Project uuid
        uuid: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotificationsAction {
    /// List configured integrations
    List,
    /// Attach an integration to a project
    Add {
        /// Project uuid
        project: String,
        /// Display title
        #[arg(long)]
        title: String,
        /// Integration kind
        #[arg(long, default_value = "webhook", value_parser = ["webhook", "mattermost", "slack"])]
        kind: String,
        /// Incoming webhook url
        #[arg(long)]
        url: String,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
        /// Mattermost channel override
        #[arg(long)]
        channel: Option<String>,
        /// Mattermost bot username
        #[arg(long)]
        username: Option<String>,
    },
    /// Remove an integration
    Remove {
        /// Notification id
        id: i64,
    },
}
