use crate::core::errors::Result;
use crate::core::models::activity_entry::{ActivityAction, ActivityEntry};

/// Port for recording and querying mutating operations.
pub trait ActivityLog {
    /// Append an entry to the log.
    fn record(&self, entry: &ActivityEntry) -> Result<()>;

    /// Query all entries, optionally filtered.
    fn query(
        &self,
        action: Option<ActivityAction>,
        since: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<Vec<ActivityEntry>>;
}
