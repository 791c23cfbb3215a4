use std::collections::BTreeSet;

use rolekeeper_application::{DirectoryRepository, RoleAdminGateway, SubmissionErrorKind};
use rolekeeper_core::NonEmptyString;
use rolekeeper_domain::{
    Assignment, HierarchyLink, NewRole, Permission, PermissionId, Role, RoleId,
    StoreHierarchyLink, StoreId, StoreRef, UserId, UserRef,
};

use super::InMemoryRoleAdminBackend;

fn actor(value: &str) -> NonEmptyString {
    NonEmptyString::new(value).unwrap_or_else(|_| panic!("actor must be non-empty"))
}

async fn seeded_backend() -> InMemoryRoleAdminBackend {
    let backend = InMemoryRoleAdminBackend::new();
    backend
        .seed_permission(Permission::new(PermissionId::new(10), "sales.read"))
        .await;
    backend
        .seed_permission(Permission::new(PermissionId::new(11), "sales.refund"))
        .await;
    backend
        .seed_role(Role::new(RoleId::new(1), "Admin", [PermissionId::new(10)]))
        .await;
    backend
        .seed_role(Role::new(RoleId::new(2), "Cashier", Vec::new()))
        .await;
    backend
        .seed_user(UserRef::new(UserId::new(7), "dana"))
        .await;
    backend
        .seed_store(StoreRef::new(StoreId::new(5), "Downtown"))
        .await;
    backend
        .seed_store(StoreRef::new(StoreId::new(6), "Harbor"))
        .await;
    backend
}

#[tokio::test]
async fn create_role_assigns_next_id_and_rejects_duplicate_names() {
    let backend = seeded_backend().await;

    let created = backend
        .create_role(NewRole {
            name: actor("Auditor"),
            permission_ids: BTreeSet::from([PermissionId::new(11)]),
        })
        .await;
    assert!(matches!(created, Ok(ref role) if role.id() == RoleId::new(3)));

    let duplicate = backend
        .create_role(NewRole {
            name: actor("auditor"),
            permission_ids: BTreeSet::new(),
        })
        .await;
    assert!(matches!(
        duplicate,
        Err(ref error) if error.kind() == SubmissionErrorKind::Conflict
            && error.message() == "role 'auditor' already exists"
    ));

    let roles = backend.list_roles().await.unwrap_or_default();
    assert_eq!(roles.len(), 3);
}

#[tokio::test]
async fn duplicate_role_names_ignore_non_ascii_case() {
    let backend = seeded_backend().await;

    let created = backend
        .create_role(NewRole {
            name: actor("Ärztin"),
            permission_ids: BTreeSet::new(),
        })
        .await;
    assert!(created.is_ok());

    let duplicate = backend
        .create_role(NewRole {
            name: actor("ÄRZTIN"),
            permission_ids: BTreeSet::new(),
        })
        .await;
    assert!(matches!(
        duplicate,
        Err(ref error) if error.kind() == SubmissionErrorKind::Conflict
    ));
}

#[tokio::test]
async fn duplicate_hierarchy_link_is_a_conflict() {
    let backend = seeded_backend().await;
    let link = HierarchyLink {
        higher_role_id: RoleId::new(1),
        lower_role_id: RoleId::new(2),
        created_by: actor("admin"),
        reason: String::new(),
    };

    assert!(backend.create_hierarchy_link(link.clone()).await.is_ok());
    let second = backend.create_hierarchy_link(link).await;

    assert!(matches!(
        second,
        Err(ref error) if error.kind() == SubmissionErrorKind::Conflict
    ));
    assert_eq!(backend.hierarchy_links().await.len(), 1);
}

#[tokio::test]
async fn hierarchy_link_to_missing_role_is_rejected() {
    let backend = seeded_backend().await;

    let result = backend
        .create_hierarchy_link(HierarchyLink {
            higher_role_id: RoleId::new(1),
            lower_role_id: RoleId::new(9),
            created_by: actor("admin"),
            reason: "restructure".to_owned(),
        })
        .await;

    assert!(matches!(
        result,
        Err(ref error) if error.kind() == SubmissionErrorKind::Rejected
            && error.message() == "role '9' does not exist"
    ));
}

#[tokio::test]
async fn assign_permissions_replaces_the_whole_set() {
    let backend = seeded_backend().await;

    let updated = backend
        .assign_permissions(RoleId::new(1), BTreeSet::from([PermissionId::new(11)]))
        .await;
    assert!(matches!(
        updated,
        Ok(ref role) if role.permissions() == &BTreeSet::from([PermissionId::new(11)])
    ));

    let unknown = backend
        .assign_permissions(RoleId::new(1), BTreeSet::from([PermissionId::new(99)]))
        .await;
    assert!(matches!(
        unknown,
        Err(ref error) if error.message() == "permissions do not exist: 99"
    ));
}

#[tokio::test]
async fn assignments_are_recorded_once() {
    let backend = seeded_backend().await;
    let assignment = Assignment::UserToRoleAtStore {
        user_id: UserId::new(7),
        role_id: RoleId::new(2),
        store_id: StoreId::new(5),
    };

    let first = backend.create_assignment(assignment).await;
    assert!(matches!(first, Ok(ref record) if record.assignment == assignment));

    let second = backend.create_assignment(assignment).await;
    assert!(matches!(
        second,
        Err(ref error) if error.kind() == SubmissionErrorKind::Conflict
    ));

    let missing_store = backend
        .create_assignment(Assignment::StoreToRole {
            store_id: StoreId::new(42),
            role_id: RoleId::new(2),
        })
        .await;
    assert!(matches!(
        missing_store,
        Err(ref error) if error.message() == "store '42' does not exist"
    ));

    let recorded = backend.list_assignments().await.unwrap_or_default();
    assert_eq!(recorded.len(), 1);
}

#[tokio::test]
async fn store_hierarchy_links_are_unique_per_pair() {
    let backend = seeded_backend().await;
    let link = StoreHierarchyLink {
        parent_store_id: StoreId::new(5),
        child_store_id: StoreId::new(6),
        created_by: actor("ops"),
        reason: String::new(),
    };

    assert!(backend.create_store_hierarchy_link(link.clone()).await.is_ok());
    let second = backend.create_store_hierarchy_link(link).await;

    assert!(matches!(
        second,
        Err(ref error) if error.kind() == SubmissionErrorKind::Conflict
    ));
    assert_eq!(backend.store_hierarchy_links().await.len(), 1);
}
