use rolekeeper_application::AssignmentRecord;
use rolekeeper_domain::{
    AssignmentInput, HierarchyLink, HierarchyLinkInput, NewRoleInput, Permission, PermissionId,
    Role, RoleId, StoreHierarchyLink, StoreHierarchyLinkInput, StoreId, StoreRef, UserId, UserRef,
};

use super::directory::{
    AssignmentResponse, PermissionResponse, RoleResponse, StoreResponse, UserResponse,
};
use super::submissions::{
    CreateAssignmentRequest, CreateHierarchyLinkRequest, CreateRoleRequest,
    CreateStoreHierarchyLinkRequest, HierarchyLinkResponse, StoreHierarchyLinkResponse,
};

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            role_id: value.id().value(),
            name: value.name().to_owned(),
            permission_ids: value
                .permissions()
                .iter()
                .map(|permission_id| permission_id.value())
                .collect(),
        }
    }
}

impl From<Permission> for PermissionResponse {
    fn from(value: Permission) -> Self {
        Self {
            permission_id: value.id.value(),
            name: value.name,
        }
    }
}

impl From<UserRef> for UserResponse {
    fn from(value: UserRef) -> Self {
        Self {
            user_id: value.id.value(),
            name: value.name,
        }
    }
}

impl From<StoreRef> for StoreResponse {
    fn from(value: StoreRef) -> Self {
        Self {
            store_id: value.id.value(),
            name: value.name,
        }
    }
}

impl From<AssignmentRecord> for AssignmentResponse {
    fn from(value: AssignmentRecord) -> Self {
        let assignment = value.assignment;
        Self {
            kind: assignment.kind().as_str().to_owned(),
            user_id: assignment.user_id().map(UserId::value),
            role_id: assignment.role_id().value(),
            store_id: assignment.store_id().map(StoreId::value),
            assigned_at: value.assigned_at.to_rfc3339(),
        }
    }
}

impl From<HierarchyLink> for HierarchyLinkResponse {
    fn from(value: HierarchyLink) -> Self {
        Self {
            higher_role_id: value.higher_role_id.value(),
            lower_role_id: value.lower_role_id.value(),
            created_by: value.created_by.into(),
            reason: value.reason,
        }
    }
}

impl From<StoreHierarchyLink> for StoreHierarchyLinkResponse {
    fn from(value: StoreHierarchyLink) -> Self {
        Self {
            parent_store_id: value.parent_store_id.value(),
            child_store_id: value.child_store_id.value(),
            created_by: value.created_by.into(),
            reason: value.reason,
        }
    }
}

impl From<CreateRoleRequest> for NewRoleInput {
    fn from(value: CreateRoleRequest) -> Self {
        Self {
            name: value.name,
            permission_ids: value
                .permission_ids
                .into_iter()
                .map(PermissionId::new)
                .collect(),
        }
    }
}

impl From<CreateHierarchyLinkRequest> for HierarchyLinkInput {
    fn from(value: CreateHierarchyLinkRequest) -> Self {
        Self {
            higher_role_id: value.higher_role_id.map(RoleId::new),
            lower_role_id: value.lower_role_id.map(RoleId::new),
            created_by: value.created_by,
            reason: value.reason,
        }
    }
}

impl From<CreateStoreHierarchyLinkRequest> for StoreHierarchyLinkInput {
    fn from(value: CreateStoreHierarchyLinkRequest) -> Self {
        Self {
            parent_store_id: value.parent_store_id.map(StoreId::new),
            child_store_id: value.child_store_id.map(StoreId::new),
            created_by: value.created_by,
            reason: value.reason,
        }
    }
}

impl From<CreateAssignmentRequest> for AssignmentInput {
    fn from(value: CreateAssignmentRequest) -> Self {
        Self {
            kind: value.kind,
            user_id: value.user_id.map(UserId::new),
            role_id: value.role_id.map(RoleId::new),
            store_id: value.store_id.map(StoreId::new),
        }
    }
}
