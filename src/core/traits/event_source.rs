use crate::core::errors::Result;
use crate::core::models::event::EventRecord;

/// Port for loading the raw event collection.
///
/// Implementations live in `adapters` (a local JSON file or the backend
/// API). The pipeline only ever sees the returned records.
pub trait EventSource {
    /// Fetch every event visible to the caller.
    fn fetch_events(&self) -> Result<Vec<EventRecord>>;

    /// Human-readable origin (a path or a URL) for messages.
    fn describe(&self) -> String;
}
