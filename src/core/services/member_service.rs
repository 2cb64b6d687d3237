use tracing::{info, warn};

use crate::core::errors::Result;
use crate::core::models::member::{MemberCall, MemberDiff, MemberOp, SyncReport, UserId};
use crate::core::traits::membership::MembershipApi;

/// Translates a desired member list into add/remove calls against a
/// `MembershipApi` backend.
pub struct MemberService<M: MembershipApi> {
    pub api: M,
}

impl<M: MembershipApi> MemberService<M> {
    /// Compute the diff for `project_uuid` from the server's current list.
    pub fn plan(&self, project_uuid: &str, desired: &[UserId]) -> Result<MemberDiff> {
        let current = self.api.list_members(project_uuid)?;
        Ok(MemberDiff::between(
            current.iter().map(|m| m.id),
            desired.iter().copied(),
        ))
    }

    /// Fetch, diff, then replay every add followed by every remove.
    ///
    /// A failed call does not stop the remaining ones; each outcome is
    /// kept in the report. The member list is fetched again afterwards so
    /// the caller sees the state the server ended up in.
    pub fn sync(&self, project_uuid: &str, desired: &[UserId]) -> Result<SyncReport> {
        let diff = self.plan(project_uuid, desired)?;
        info!(
            project = project_uuid,
            add = diff.to_add.len(),
            remove = diff.to_remove.len(),
            "syncing project members"
        );

        let mut calls = Vec::with_capacity(diff.call_count());
        for &user_id in &diff.to_add {
            let outcome = self.api.add_member(project_uuid, user_id);
            calls.push(Self::record(MemberOp::Add, user_id, outcome));
        }
        for &user_id in &diff.to_remove {
            let outcome = self.api.remove_member(project_uuid, user_id);
            calls.push(Self::record(MemberOp::Remove, user_id, outcome));
        }

        let members_after = if diff.is_empty() {
            None
        } else {
            match self.api.list_members(project_uuid) {
                Ok(members) => Some(members),
                Err(e) => {
                    warn!(project = project_uuid, error = %e, "could not re-fetch members");
                    None
                }
            }
        };

        Ok(SyncReport {
            project_uuid: project_uuid.to_string(),
            diff,
            calls,
            members_after,
        })
    }

    fn record(op: MemberOp, user_id: UserId, outcome: Result<()>) -> MemberCall {
        let error = outcome.err().map(|e| {
            warn!(?op, user_id, error = %e, "membership call failed");
            e.to_string()
        });
        MemberCall { op, user_id, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::IssueLensError;
    use crate::core::models::member::Member;
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    /// In-memory membership backend; ids in `failing` reject every call.
    struct FakeApi {
        members: RefCell<BTreeSet<UserId>>,
        failing: BTreeSet<UserId>,
        log: RefCell<Vec<(MemberOp, UserId)>>,
    }

    impl FakeApi {
        fn with(members: &[UserId], failing: &[UserId]) -> Self {
            Self {
                members: RefCell::new(members.iter().copied().collect()),
                failing: failing.iter().copied().collect(),
                log: RefCell::new(Vec::new()),
            }
        }

        fn reject(&self, user_id: UserId) -> Result<()> {
            if self.failing.contains(&user_id) {
                return Err(IssueLensError::ApiRequestFailed {
                    endpoint: format!("/members/{user_id}"),
                    reason: "HTTP 500".into(),
                });
            }
            Ok(())
        }
    }

    impl MembershipApi for FakeApi {
        fn list_members(&self, _project_uuid: &str) -> Result<Vec<Member>> {
            Ok(self
                .members
                .borrow()
                .iter()
                .map(|&id| Member {
                    id,
                    login: format!("user{id}"),
                    name: None,
                    role: None,
                })
                .collect())
        }

        fn add_member(&self, _project_uuid: &str, user_id: UserId) -> Result<()> {
            self.log.borrow_mut().push((MemberOp::Add, user_id));
            self.reject(user_id)?;
            self.members.borrow_mut().insert(user_id);
            Ok(())
        }

        fn remove_member(&self, _project_uuid: &str, user_id: UserId) -> Result<()> {
            self.log.borrow_mut().push((MemberOp::Remove, user_id));
            self.reject(user_id)?;
            self.members.borrow_mut().remove(&user_id);
            Ok(())
        }
    }

    #[test]
    fn sync_adds_before_removing() {
        let svc = MemberService {
            api: FakeApi::with(&[1, 2, 3], &[]),
        };

        let report = svc.sync("p", &[2, 3, 4, 5]).unwrap();

        assert!(report.is_complete());
        assert_eq!(
            *svc.api.log.borrow(),
            vec![(MemberOp::Add, 4), (MemberOp::Add, 5), (MemberOp::Remove, 1)]
        );
        let after: Vec<UserId> = report
            .members_after
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(after, vec![2, 3, 4, 5]);
    }

    #[test]
    fn sync_without_changes_makes_no_calls() {
        let svc = MemberService {
            api: FakeApi::with(&[1, 2], &[]),
        };

        let report = svc.sync("p", &[2, 1]).unwrap();

        assert!(report.calls.is_empty());
        assert!(report.members_after.is_none());
        assert!(svc.api.log.borrow().is_empty());
    }

    #[test]
    fn failed_call_does_not_stop_the_rest() {
        let svc = MemberService {
            api: FakeApi::with(&[1, 2], &[3]),
        };

        let report = svc.sync("p", &[2, 3, 4]).unwrap();

        assert!(!report.is_complete());
        let failed: Vec<UserId> = report.failed().map(|c| c.user_id).collect();
        assert_eq!(failed, vec![3]);
        assert_eq!(report.calls.len(), 3);
        // Server state: 3 never landed, 4 did, 1 was removed.
        let after: Vec<UserId> = report
            .members_after
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(after, vec![2, 4]);
    }

    #[test]
    fn replaying_a_sync_converges() {
        let svc = MemberService {
            api: FakeApi::with(&[1], &[]),
        };

        svc.sync("p", &[2]).unwrap();
        let second = svc.sync("p", &[2]).unwrap();

        assert!(second.diff.is_empty());
    }
}
