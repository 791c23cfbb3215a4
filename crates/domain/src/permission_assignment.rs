use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::directory::DirectorySnapshot;
use crate::role::{PermissionId, RoleId};
use crate::validation::{FieldErrors, ValidationError};

/// Raw values of the permission assignment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionAssignmentInput {
    /// Role being edited.
    pub role_id: Option<RoleId>,
    /// Full proposed permission selection.
    pub permission_ids: Vec<PermissionId>,
}

/// Set difference between a proposed and the current permission set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDelta {
    /// Selected but not currently bound.
    pub added: BTreeSet<PermissionId>,
    /// Currently bound but no longer selected.
    pub removed: BTreeSet<PermissionId>,
}

impl PermissionDelta {
    /// Computes the delta from `current` to `proposed`.
    #[must_use]
    pub fn between(current: &BTreeSet<PermissionId>, proposed: &BTreeSet<PermissionId>) -> Self {
        Self {
            added: proposed.difference(current).copied().collect(),
            removed: current.difference(proposed).copied().collect(),
        }
    }

    /// Returns true when nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Validated role/permission-set pair ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionAssignment {
    /// Role being edited.
    pub role_id: RoleId,
    /// Full permission set the role should end up with.
    pub permission_ids: BTreeSet<PermissionId>,
    /// Change versus the role's currently known permissions.
    pub delta: PermissionDelta,
}

impl PermissionAssignment {
    /// Returns true when submitting would not change anything.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.delta.is_empty()
    }
}

/// Validates a permission selection for a role.
///
/// The snapshot's permission collection is the available set; every selected
/// id must be in it.
pub fn validate_permission_assignment(
    snapshot: &DirectorySnapshot,
    input: &PermissionAssignmentInput,
) -> Result<PermissionAssignment, ValidationError> {
    let mut errors = FieldErrors::new();

    let role = errors.check("role_id", snapshot.require_role(input.role_id));
    let permission_ids = errors.check(
        "permission_ids",
        snapshot.require_permissions(input.permission_ids.iter().copied()),
    );

    errors.into_result(
        role.zip(permission_ids)
            .map(|(role, permission_ids)| PermissionAssignment {
                role_id: role.id(),
                delta: PermissionDelta::between(role.permissions(), &permission_ids),
                permission_ids,
            }),
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::role::{Permission, Role};
    use crate::validation::FieldError;

    fn ids(values: &[i64]) -> Vec<PermissionId> {
        values.iter().copied().map(PermissionId::new).collect()
    }

    fn id_set(values: &[i64]) -> BTreeSet<PermissionId> {
        values.iter().copied().map(PermissionId::new).collect()
    }

    fn snapshot(current: &[i64], available: &[i64]) -> DirectorySnapshot {
        DirectorySnapshot::new(
            vec![Role::new(RoleId::new(5), "Supervisor", ids(current))],
            available
                .iter()
                .map(|id| Permission::new(PermissionId::new(*id), format!("perm-{id}")))
                .collect(),
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn swapping_one_permission_yields_added_and_removed() {
        let assignment = validate_permission_assignment(
            &snapshot(&[10, 11], &[10, 11, 12]),
            &PermissionAssignmentInput {
                role_id: Some(RoleId::new(5)),
                permission_ids: ids(&[10, 12]),
            },
        )
        .unwrap_or_else(|error| panic!("unexpected validation error: {error}"));

        assert_eq!(assignment.role_id, RoleId::new(5));
        assert_eq!(assignment.permission_ids, id_set(&[10, 12]));
        assert_eq!(assignment.delta.added, id_set(&[12]));
        assert_eq!(assignment.delta.removed, id_set(&[11]));
        assert!(!assignment.is_unchanged());
    }

    #[test]
    fn selection_outside_available_set_names_offending_ids() {
        let error = validate_permission_assignment(
            &snapshot(&[10], &[10, 11]),
            &PermissionAssignmentInput {
                role_id: Some(RoleId::new(5)),
                permission_ids: ids(&[10, 14, 13]),
            },
        )
        .err()
        .unwrap_or_else(|| panic!("expected validation error"));

        assert_eq!(
            error.get("permission_ids"),
            Some(&FieldError::UnknownPermissions(ids(&[13, 14])))
        );
    }

    #[test]
    fn unknown_role_and_unknown_permission_are_both_reported() {
        let error = validate_permission_assignment(
            &snapshot(&[], &[10]),
            &PermissionAssignmentInput {
                role_id: Some(RoleId::new(6)),
                permission_ids: ids(&[99]),
            },
        )
        .err()
        .unwrap_or_else(|| panic!("expected validation error"));

        assert_eq!(error.get("role_id"), Some(&FieldError::UnknownRole));
        assert!(error.contains("permission_ids"));
    }

    #[test]
    fn clearing_every_permission_is_a_valid_selection() {
        let assignment = validate_permission_assignment(
            &snapshot(&[10, 11], &[10, 11]),
            &PermissionAssignmentInput {
                role_id: Some(RoleId::new(5)),
                permission_ids: Vec::new(),
            },
        )
        .unwrap_or_else(|error| panic!("unexpected validation error: {error}"));

        assert!(assignment.delta.added.is_empty());
        assert_eq!(assignment.delta.removed, id_set(&[10, 11]));
    }

    proptest! {
        #[test]
        fn resubmitting_current_permissions_is_a_no_op(
            current in prop::collection::btree_set(1_i64..50, 0..10),
        ) {
            let current: Vec<i64> = current.into_iter().collect();
            let snapshot = snapshot(&current, &current);

            let result = validate_permission_assignment(
                &snapshot,
                &PermissionAssignmentInput {
                    role_id: Some(RoleId::new(5)),
                    permission_ids: ids(&current),
                },
            );

            let Ok(assignment) = result else {
                return Err(TestCaseError::fail("current permissions were rejected"));
            };
            prop_assert!(assignment.delta.added.is_empty());
            prop_assert!(assignment.delta.removed.is_empty());
            prop_assert!(assignment.is_unchanged());
        }

        #[test]
        fn selections_beyond_available_always_fail(
            available in prop::collection::btree_set(1_i64..50, 0..10),
            extra in 50_i64..100,
        ) {
            let available: Vec<i64> = available.into_iter().collect();
            let snapshot = snapshot(&[], &available);
            let mut selected = available.clone();
            selected.push(extra);

            let result = validate_permission_assignment(
                &snapshot,
                &PermissionAssignmentInput {
                    role_id: Some(RoleId::new(5)),
                    permission_ids: ids(&selected),
                },
            );

            let offending = result
                .err()
                .and_then(|error| error.get("permission_ids").cloned());
            prop_assert_eq!(
                offending,
                Some(FieldError::UnknownPermissions(vec![PermissionId::new(extra)]))
            );
        }
    }
}
