use std::collections::HashSet;

use tracing::{info, warn};

use crate::core::errors::{IssueLensError, Result};
use crate::core::models::notification::{NewNotification, Notification};
use crate::core::models::project::{NewProject, RemoteProject};
use crate::core::traits::admin::AdminApi;

/// Project and notification management on top of an `AdminApi` backend.
///
/// Deletions are resolved against the current listing first, so that a
/// typo is reported instead of being silently accepted by the server.
pub struct AdminService<A: AdminApi> {
    pub api: A,
}

impl<A: AdminApi> AdminService<A> {
    /// Create a project and return it as registered.
    ///
    /// The backend does not echo the new uuid, so it is recovered by
    /// comparing the listings before and after. `None` when that second
    /// listing fails or shows no new project.
    pub fn create_project(&self, project: &NewProject) -> Result<Option<RemoteProject>> {
        let before: HashSet<String> = self
            .api
            .list_projects()?
            .into_iter()
            .map(|p| p.uuid)
            .collect();

        self.api.create_project(project)?;
        info!(title = %project.title, "project created");

        match self.api.list_projects() {
            Ok(after) => Ok(after
                .into_iter()
                .filter(|p| !before.contains(&p.uuid))
                .find(|p| p.title == project.title)),
            Err(e) => {
                warn!(error = %e, "could not re-fetch projects");
                Ok(None)
            }
        }
    }

    pub fn delete_project(&self, uuid: &str) -> Result<RemoteProject> {
        let project = self
            .api
            .list_projects()?
            .into_iter()
            .find(|p| p.uuid == uuid)
            .ok_or_else(|| IssueLensError::ProjectNotFound {
                uuid: uuid.to_string(),
            })?;

        self.api.delete_project(uuid)?;
        info!(uuid, "project deleted");
        Ok(project)
    }

    /// Validate, check the target project exists, then create.
    pub fn create_notification(&self, notification: &NewNotification) -> Result<Notification> {
        notification.validate()?;

        let known = self
            .api
            .list_projects()?
            .iter()
            .any(|p| p.uuid == notification.project_uuid);
        if !known {
            return Err(IssueLensError::ProjectNotFound {
                uuid: notification.project_uuid.clone(),
            });
        }

        let created = self.api.create_notification(notification)?;
        info!(id = created.id, kind = %notification.kind, "notification created");
        Ok(created)
    }

    pub fn delete_notification(&self, id: i64) -> Result<Notification> {
        let notification = self
            .api
            .list_notifications()?
            .into_iter()
            .find(|n| n.id == id)
            .ok_or(IssueLensError::NotificationNotFound { id })?;

        self.api.delete_notification(id)?;
        info!(id, "notification deleted");
        Ok(notification)
    }
}
