use crate::core::errors::Result;
use crate::core::models::member::Member;
use crate::core::models::notification::{NewNotification, Notification};
use crate::core::models::project::{NewProject, RemoteProject};

/// Port for the backend's project, notification and user endpoints.
pub trait AdminApi {
    fn list_projects(&self) -> Result<Vec<RemoteProject>>;

    /// The backend answers with a bare acknowledgement, not the project.
    fn create_project(&self, project: &NewProject) -> Result<()>;

    fn delete_project(&self, uuid: &str) -> Result<()>;

    fn list_notifications(&self) -> Result<Vec<Notification>>;

    fn create_notification(&self, notification: &NewNotification) -> Result<Notification>;

    fn delete_notification(&self, id: i64) -> Result<()>;

    fn list_users(&self) -> Result<Vec<Member>>;
}
