use async_trait::async_trait;

use rolekeeper_domain::{
    Assignment, AssignmentInput, DirectorySnapshot, HierarchyLink, HierarchyLinkInput, NewRole,
    NewRoleInput, PermissionAssignment, PermissionAssignmentInput, PermissionDelta, Role, RoleId,
    StoreHierarchyLink, StoreHierarchyLinkInput, ValidationError, validate_assignment,
    validate_hierarchy_link, validate_new_role, validate_permission_assignment,
    validate_store_hierarchy_link,
};

use super::FormAction;
use crate::role_admin_ports::{AssignmentRecord, RoleAdminGateway, SubmissionError};

/// Role creation form.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateRoleAction;

#[async_trait]
impl FormAction for CreateRoleAction {
    const NAME: &'static str = "create_role";

    type Input = NewRoleInput;
    type Validated = NewRole;
    type Created = Role;

    fn validate(
        &self,
        snapshot: &DirectorySnapshot,
        input: &Self::Input,
    ) -> Result<Self::Validated, ValidationError> {
        validate_new_role(snapshot, input)
    }

    async fn submit(
        &self,
        gateway: &dyn RoleAdminGateway,
        value: Self::Validated,
    ) -> Result<Self::Created, SubmissionError> {
        gateway.create_role(value).await
    }
}

/// Role hierarchy form.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyLinkAction;

#[async_trait]
impl FormAction for HierarchyLinkAction {
    const NAME: &'static str = "create_hierarchy_link";

    type Input = HierarchyLinkInput;
    type Validated = HierarchyLink;
    type Created = HierarchyLink;

    fn validate(
        &self,
        snapshot: &DirectorySnapshot,
        input: &Self::Input,
    ) -> Result<Self::Validated, ValidationError> {
        validate_hierarchy_link(snapshot, input)
    }

    async fn submit(
        &self,
        gateway: &dyn RoleAdminGateway,
        value: Self::Validated,
    ) -> Result<Self::Created, SubmissionError> {
        gateway.create_hierarchy_link(value).await
    }
}

/// Store hierarchy form.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreHierarchyLinkAction;

#[async_trait]
impl FormAction for StoreHierarchyLinkAction {
    const NAME: &'static str = "create_store_hierarchy_link";

    type Input = StoreHierarchyLinkInput;
    type Validated = StoreHierarchyLink;
    type Created = StoreHierarchyLink;

    fn validate(
        &self,
        snapshot: &DirectorySnapshot,
        input: &Self::Input,
    ) -> Result<Self::Validated, ValidationError> {
        validate_store_hierarchy_link(snapshot, input)
    }

    async fn submit(
        &self,
        gateway: &dyn RoleAdminGateway,
        value: Self::Validated,
    ) -> Result<Self::Created, SubmissionError> {
        gateway.create_store_hierarchy_link(value).await
    }
}

/// Result of a permission assignment submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionAssignmentOutcome {
    /// The selection matched the current permissions; nothing was sent.
    Unchanged {
        /// Role that was left as is.
        role_id: RoleId,
    },
    /// The backend stored the new permission set.
    Applied {
        /// Role as returned by the backend.
        role: Role,
        /// Change that was applied.
        delta: PermissionDelta,
    },
}

/// Permission assignment form.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionAssignmentAction;

#[async_trait]
impl FormAction for PermissionAssignmentAction {
    const NAME: &'static str = "assign_permissions";

    type Input = PermissionAssignmentInput;
    type Validated = PermissionAssignment;
    type Created = PermissionAssignmentOutcome;

    fn validate(
        &self,
        snapshot: &DirectorySnapshot,
        input: &Self::Input,
    ) -> Result<Self::Validated, ValidationError> {
        validate_permission_assignment(snapshot, input)
    }

    async fn submit(
        &self,
        gateway: &dyn RoleAdminGateway,
        value: Self::Validated,
    ) -> Result<Self::Created, SubmissionError> {
        if value.is_unchanged() {
            return Ok(PermissionAssignmentOutcome::Unchanged {
                role_id: value.role_id,
            });
        }

        let PermissionAssignment {
            role_id,
            permission_ids,
            delta,
        } = value;
        let role = gateway.assign_permissions(role_id, permission_ids).await?;

        Ok(PermissionAssignmentOutcome::Applied { role, delta })
    }
}

/// User/store assignment form.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentAction;

#[async_trait]
impl FormAction for AssignmentAction {
    const NAME: &'static str = "create_assignment";

    type Input = AssignmentInput;
    type Validated = Assignment;
    type Created = AssignmentRecord;

    fn validate(
        &self,
        snapshot: &DirectorySnapshot,
        input: &Self::Input,
    ) -> Result<Self::Validated, ValidationError> {
        validate_assignment(snapshot, input)
    }

    async fn submit(
        &self,
        gateway: &dyn RoleAdminGateway,
        value: Self::Validated,
    ) -> Result<Self::Created, SubmissionError> {
        gateway.create_assignment(value).await
    }
}
