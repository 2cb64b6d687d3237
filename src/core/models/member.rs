use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::errors::{IssueLensError, Result};
use crate::core::models::role::Role;

/// Backend user identifier.
pub type UserId = i64;

/// A user as returned by the members and users endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: UserId,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl Member {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.login)
    }
}

/// The account behind the session, as returned by `GET /api/auth/me`.
///
/// The backend only guarantees `role`; identity fields are filled in
/// when a deployment sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl CurrentUser {
    /// A missing role is treated as the least privileged one.
    pub fn role(&self) -> Role {
        self.role.unwrap_or(Role::User)
    }

    pub fn label(&self) -> String {
        let known = self
            .name
            .as_deref()
            .or(self.login.as_deref())
            .filter(|n| !n.is_empty());
        match (known, self.id) {
            (Some(n), _) => n.to_string(),
            (None, Some(id)) => format!("user #{id}"),
            (None, None) => "current session".to_string(),
        }
    }

    /// Refuse `action` unless the role is one of `Role::MANAGERS`.
    pub fn authorize(&self, action: &str) -> Result<()> {
        let role = self.role();
        if role.is_manager() {
            return Ok(());
        }
        Err(IssueLensError::Forbidden {
            role: role.to_string(),
            action: action.to_string(),
            required: Role::MANAGERS.map(Role::as_str).join(", "),
        })
    }
}

/// Minimal set of membership calls turning `current` into `desired`.
///
/// Both lists are sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberDiff {
    pub to_add: Vec<UserId>,
    pub to_remove: Vec<UserId>,
}

impl MemberDiff {
    /// Set difference between two snapshots of member ids.
    ///
    /// - `to_add`: ids in `desired` but not in `current`
    /// - `to_remove`: ids in `current` but not in `desired`
    ///
    /// Duplicates in the inputs are ignored.
    pub fn between<C, D>(current: C, desired: D) -> Self
    where
        C: IntoIterator<Item = UserId>,
        D: IntoIterator<Item = UserId>,
    {
        let current: BTreeSet<UserId> = current.into_iter().collect();
        let desired: BTreeSet<UserId> = desired.into_iter().collect();

        Self {
            to_add: desired.difference(&current).copied().collect(),
            to_remove: current.difference(&desired).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Number of API calls the diff translates to.
    pub fn call_count(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }

    /// `(current \ to_remove) ∪ to_add`.
    #[cfg(test)]
    pub fn apply(&self, current: &BTreeSet<UserId>) -> BTreeSet<UserId> {
        current
            .iter()
            .filter(|id| !self.to_remove.contains(*id))
            .chain(self.to_add.iter())
            .copied()
            .collect()
    }
}

/// Kind of membership mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberOp {
    Add,
    Remove,
}

/// Outcome of one add/remove call during a sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberCall {
    pub op: MemberOp,
    pub user_id: UserId,
    /// `None` on success, the error message otherwise.
    pub error: Option<String>,
}

/// Result of replaying a diff against the membership API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub project_uuid: String,
    pub diff: MemberDiff,
    pub calls: Vec<MemberCall>,
    /// Member list re-fetched after the calls, if that fetch succeeded.
    pub members_after: Option<Vec<Member>>,
}

impl SyncReport {
    pub fn failed(&self) -> impl Iterator<Item = &MemberCall> {
        self.calls.iter().filter(|c| c.error.is_some())
    }

    pub fn is_complete(&self) -> bool {
        self.failed().next().is_none()
    }
}
