use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::models::window::TimeWindow;

/// User-selected filters for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub window: TimeWindow,
    /// Selected project uuids. Empty means "every project".
    pub projects: BTreeSet<String>,
}

impl FilterState {
    pub fn new<I, S>(window: TimeWindow, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            window,
            projects: projects
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.trim().is_empty())
                .collect(),
        }
    }

    /// Whether `project_uuid` passes the project restriction.
    pub fn admits_project(&self, project_uuid: &str) -> bool {
        self.projects.is_empty() || self.projects.contains(project_uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_project_set_admits_everything() {
        let state = FilterState::new(TimeWindow::All, Vec::<String>::new());
        assert!(state.admits_project("anything"));
    }

    #[test]
    fn non_empty_set_is_a_whitelist() {
        let state = FilterState::new(TimeWindow::All, ["a", "b"]);
        assert!(state.admits_project("a"));
        assert!(!state.admits_project("c"));
    }

    #[test]
    fn blank_ids_are_ignored() {
        let state = FilterState::new(TimeWindow::Day, ["", "a", "a"]);
        assert_eq!(state.projects.len(), 1);
    }
}
