use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use rolekeeper_core::AppResult;
use rolekeeper_domain::{
    Assignment, HierarchyLink, NewRole, Permission, PermissionId, Role, RoleId,
    StoreHierarchyLink, StoreRef, UserRef,
};

/// Category of a rejection returned by the external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionErrorKind {
    /// The backend refused the request for a business reason.
    Rejected,
    /// The request collides with existing backend state.
    Conflict,
    /// The backend could not be reached or failed internally.
    Unavailable,
}

/// Remote failure of a submission, shown verbatim as one banner message.
///
/// Never remapped to field errors and never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmissionError {
    kind: SubmissionErrorKind,
    message: String,
}

impl SubmissionError {
    /// Creates a submission error with an explicit category.
    #[must_use]
    pub fn new(kind: SubmissionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Business rejection from the backend.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(SubmissionErrorKind::Rejected, message)
    }

    /// Collision with existing backend state.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(SubmissionErrorKind::Conflict, message)
    }

    /// Backend unreachable or failing.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(SubmissionErrorKind::Unavailable, message)
    }

    /// Returns the failure category.
    #[must_use]
    pub fn kind(&self) -> SubmissionErrorKind {
        self.kind
    }

    /// Returns the backend message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Assignment as recorded by the external service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRecord {
    /// The submitted binding.
    pub assignment: Assignment,
    /// Timestamp assigned by the backend.
    pub assigned_at: DateTime<Utc>,
}

/// Mutation port of the external administration service.
#[async_trait]
pub trait RoleAdminGateway: Send + Sync {
    /// Creates a role with its initial permissions.
    async fn create_role(&self, role: NewRole) -> Result<Role, SubmissionError>;

    /// Creates a parent/child role link.
    async fn create_hierarchy_link(
        &self,
        link: HierarchyLink,
    ) -> Result<HierarchyLink, SubmissionError>;

    /// Replaces the permission set bound to a role.
    async fn assign_permissions(
        &self,
        role_id: RoleId,
        permission_ids: BTreeSet<PermissionId>,
    ) -> Result<Role, SubmissionError>;

    /// Records a user and/or store assignment.
    async fn create_assignment(
        &self,
        assignment: Assignment,
    ) -> Result<AssignmentRecord, SubmissionError>;

    /// Creates a parent/child store link.
    async fn create_store_hierarchy_link(
        &self,
        link: StoreHierarchyLink,
    ) -> Result<StoreHierarchyLink, SubmissionError>;
}

/// Read port of the data-fetching layer.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Lists roles with their bound permissions.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Lists permissions available for assignment.
    async fn list_permissions(&self) -> AppResult<Vec<Permission>>;

    /// Lists console users.
    async fn list_users(&self) -> AppResult<Vec<UserRef>>;

    /// Lists stores.
    async fn list_stores(&self) -> AppResult<Vec<StoreRef>>;

    /// Lists recorded assignments.
    async fn list_assignments(&self) -> AppResult<Vec<AssignmentRecord>>;
}
