use std::collections::HashSet;

use crate::core::models::event::EventRecord;
use crate::core::models::project::ProjectRef;

/// Derives the project picker from an event collection.
pub struct ProjectService;

impl ProjectService {
    /// Distinct projects in first-seen order.
    ///
    /// The title comes from the first record of each project; a missing
    /// or blank title falls back to `Project <uuid prefix>`. Records
    /// without a project uuid are skipped.
    pub fn unique_projects<'a, I>(&self, events: I) -> Vec<ProjectRef>
    where
        I: IntoIterator<Item = &'a EventRecord>,
    {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut projects = Vec::new();

        for event in events {
            let uuid = event.project_uuid.as_str();
            if uuid.is_empty() || !seen.insert(uuid) {
                continue;
            }
            let title = event
                .project_title
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| ProjectRef::fallback_title(uuid));
            projects.push(ProjectRef {
                uuid: uuid.to_string(),
                title,
            });
        }

        projects
    }

    /// Title shown for `project_uuid`, looked up in `events`.
    pub fn title_of(&self, events: &[EventRecord], project_uuid: &str) -> String {
        self.unique_projects(events)
            .into_iter()
            .find(|p| p.uuid == project_uuid)
            .map(|p| p.title)
            .unwrap_or_else(|| ProjectRef::fallback_title(project_uuid))
    }
}
