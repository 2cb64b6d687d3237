use crate::core::errors::Result;
use crate::core::models::member::{Member, UserId};

/// Port for the backend's project-membership endpoints.
///
/// `add_member` and `remove_member` must be idempotent per
/// (project, user) so that a partially failed sync can be replayed.
pub trait MembershipApi {
    fn list_members(&self, project_uuid: &str) -> Result<Vec<Member>>;

    fn add_member(&self, project_uuid: &str, user_id: UserId) -> Result<()>;

    fn remove_member(&self, project_uuid: &str, user_id: UserId) -> Result<()>;
}
