use proptest::prelude::*;

use super::*;
use crate::directory::StoreRef;
use crate::role::Role;

fn roles_snapshot(ids: &[i64]) -> DirectorySnapshot {
    DirectorySnapshot::new(
        ids.iter()
            .map(|id| Role::new(RoleId::new(*id), format!("role-{id}"), []))
            .collect(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
    )
}

fn link_input(higher: i64, lower: i64, created_by: &str, reason: &str) -> HierarchyLinkInput {
    HierarchyLinkInput {
        higher_role_id: Some(RoleId::new(higher)),
        lower_role_id: Some(RoleId::new(lower)),
        created_by: created_by.to_owned(),
        reason: reason.to_owned(),
    }
}

#[test]
fn manager_over_clerk_is_accepted() {
    let snapshot = DirectorySnapshot::new(
        vec![
            Role::new(RoleId::new(1), "Manager", []),
            Role::new(RoleId::new(2), "Clerk", []),
        ],
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );

    let link = validate_hierarchy_link(&snapshot, &link_input(1, 2, "admin", "org chart"))
        .unwrap_or_else(|error| panic!("unexpected validation error: {error}"));

    assert_eq!(link.higher_role_id, RoleId::new(1));
    assert_eq!(link.lower_role_id, RoleId::new(2));
    assert_eq!(link.created_by.as_str(), "admin");
    assert_eq!(link.reason, "org chart");
}

#[test]
fn same_role_in_both_slots_fails_on_both_fields() {
    let snapshot = roles_snapshot(&[1]);

    let error = validate_hierarchy_link(&snapshot, &link_input(1, 1, "admin", ""))
        .err()
        .unwrap_or_else(|| panic!("expected validation error"));

    let messages = error.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages.get("higher_role_id").map(String::as_str),
        Some("must differ from lower role")
    );
    assert_eq!(
        messages.get("lower_role_id").map(String::as_str),
        Some("must differ from higher role")
    );
}

#[test]
fn role_missing_from_loaded_set_is_reported_as_unknown() {
    let snapshot = roles_snapshot(&[1]);

    let error = validate_hierarchy_link(&snapshot, &link_input(1, 9, "admin", ""))
        .err()
        .unwrap_or_else(|| panic!("expected validation error"));

    assert_eq!(error.get("lower_role_id"), Some(&FieldError::UnknownRole));
    assert!(!error.contains("higher_role_id"));
}

#[test]
fn unknown_role_wins_over_same_role_selection() {
    let snapshot = roles_snapshot(&[1]);

    let error = validate_hierarchy_link(&snapshot, &link_input(4, 4, "admin", ""))
        .err()
        .unwrap_or_else(|| panic!("expected validation error"));

    assert_eq!(error.get("higher_role_id"), Some(&FieldError::UnknownRole));
    assert_eq!(error.get("lower_role_id"), Some(&FieldError::UnknownRole));
}

#[test]
fn every_violated_field_is_reported_at_once() {
    let snapshot = roles_snapshot(&[1, 2]);

    let error = validate_hierarchy_link(
        &snapshot,
        &HierarchyLinkInput {
            higher_role_id: None,
            lower_role_id: Some(RoleId::new(7)),
            created_by: "   ".to_owned(),
            reason: String::new(),
        },
    )
    .err()
    .unwrap_or_else(|| panic!("expected validation error"));

    assert_eq!(error.get("higher_role_id"), Some(&FieldError::Required));
    assert_eq!(error.get("lower_role_id"), Some(&FieldError::UnknownRole));
    assert_eq!(error.get("created_by"), Some(&FieldError::Blank));
}

#[test]
fn store_hierarchy_rejects_same_store_and_unknown_store() {
    let snapshot = DirectorySnapshot::new(
        Vec::new(),
        Vec::new(),
        Vec::new(),
        vec![StoreRef::new(StoreId::new(100), "Downtown")],
    );

    let same = validate_store_hierarchy_link(
        &snapshot,
        &StoreHierarchyLinkInput {
            parent_store_id: Some(StoreId::new(100)),
            child_store_id: Some(StoreId::new(100)),
            created_by: "admin".to_owned(),
            reason: String::new(),
        },
    )
    .err()
    .unwrap_or_else(|| panic!("expected validation error"));
    assert_eq!(
        same.get("parent_store_id"),
        Some(&FieldError::MustDiffer("child store"))
    );
    assert_eq!(
        same.get("child_store_id"),
        Some(&FieldError::MustDiffer("parent store"))
    );

    let unknown = validate_store_hierarchy_link(
        &snapshot,
        &StoreHierarchyLinkInput {
            parent_store_id: Some(StoreId::new(100)),
            child_store_id: Some(StoreId::new(101)),
            created_by: "admin".to_owned(),
            reason: String::new(),
        },
    )
    .err()
    .unwrap_or_else(|| panic!("expected validation error"));
    assert_eq!(
        unknown.get("child_store_id"),
        Some(&FieldError::UnknownStore)
    );
}

proptest! {
    #[test]
    fn distinct_loaded_roles_always_link(a in 1_i64..500, b in 1_i64..500) {
        prop_assume!(a != b);
        let snapshot = roles_snapshot(&[a, b]);

        let result = validate_hierarchy_link(&snapshot, &link_input(a, b, "x", ""));

        prop_assert!(result.is_ok());
    }

    #[test]
    fn a_role_never_links_to_itself(a in 1_i64..500) {
        let snapshot = roles_snapshot(&[a]);

        let result = validate_hierarchy_link(&snapshot, &link_input(a, a, "x", ""));

        let Err(error) = result else {
            return Err(TestCaseError::fail("self link was accepted"));
        };
        prop_assert!(matches!(error.get("higher_role_id"), Some(FieldError::MustDiffer(_))));
        prop_assert!(matches!(error.get("lower_role_id"), Some(FieldError::MustDiffer(_))));
    }

    #[test]
    fn roles_outside_the_loaded_set_are_unknown(loaded in 1_i64..100, missing in 100_i64..200) {
        let snapshot = roles_snapshot(&[loaded]);

        let result = validate_hierarchy_link(&snapshot, &link_input(missing, loaded, "x", ""));

        let unknown = result
            .err()
            .and_then(|error| error.get("higher_role_id").cloned());
        prop_assert_eq!(unknown, Some(FieldError::UnknownRole));
    }
}
