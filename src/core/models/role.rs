use std::fmt;

use serde::{Deserialize, Serialize};

/// Account role as reported by `GET /api/auth/me`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    ProjectManager,
    Admin,
}

impl Role {
    /// Roles the backend lets create and delete projects, change
    /// members, manage notifications and list users.
    pub const MANAGERS: [Role; 2] = [Role::Admin, Role::ProjectManager];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::ProjectManager => "project_manager",
            Role::Admin => "admin",
        }
    }

    pub fn is_manager(self) -> bool {
        Self::MANAGERS.contains(&self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admins_and_project_managers_are_managers() {
        assert!(Role::Admin.is_manager());
        assert!(Role::ProjectManager.is_manager());
        assert!(!Role::User.is_manager());
    }

    #[test]
    fn deserializes_backend_role_strings() {
        let role: Role = serde_json::from_str("\"project_manager\"").unwrap();
        assert_eq!(role, Role::ProjectManager);
    }
}
