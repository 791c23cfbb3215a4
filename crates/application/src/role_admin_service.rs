use std::sync::Arc;

use tracing::debug;

use rolekeeper_core::{AppError, AppResult};
use rolekeeper_domain::{
    DirectorySnapshot, LifecycleError, Permission, Role, RoleId, StoreRef, UserRef,
};

use crate::role_admin_ports::{AssignmentRecord, DirectoryRepository, RoleAdminGateway};
use crate::submission_form::{FormAction, FormOutcome, FormSettings, SubmissionForm};

/// Application service for role administration workflows.
#[derive(Clone)]
pub struct RoleAdminService {
    directory: Arc<dyn DirectoryRepository>,
    gateway: Arc<dyn RoleAdminGateway>,
    form_settings: FormSettings,
}

impl RoleAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        directory: Arc<dyn DirectoryRepository>,
        gateway: Arc<dyn RoleAdminGateway>,
        form_settings: FormSettings,
    ) -> Self {
        Self {
            directory,
            gateway,
            form_settings,
        }
    }

    /// Fetches a fresh request-scoped copy of every lookup collection.
    pub async fn load_snapshot(&self) -> AppResult<DirectorySnapshot> {
        let roles = self.directory.list_roles().await?;
        let permissions = self.directory.list_permissions().await?;
        let users = self.directory.list_users().await?;
        let stores = self.directory.list_stores().await?;

        debug!(
            roles = roles.len(),
            permissions = permissions.len(),
            users = users.len(),
            stores = stores.len(),
            "loaded directory snapshot"
        );

        Ok(DirectorySnapshot::new(roles, permissions, users, stores))
    }

    /// Returns all roles.
    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.directory.list_roles().await
    }

    /// Returns one role by id.
    pub async fn find_role(&self, role_id: RoleId) -> AppResult<Role> {
        self.directory
            .list_roles()
            .await?
            .into_iter()
            .find(|role| role.id() == role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    /// Returns all assignable permissions.
    pub async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        self.directory.list_permissions().await
    }

    /// Returns all users.
    pub async fn list_users(&self) -> AppResult<Vec<UserRef>> {
        self.directory.list_users().await
    }

    /// Returns all stores.
    pub async fn list_stores(&self) -> AppResult<Vec<StoreRef>> {
        self.directory.list_stores().await
    }

    /// Returns recorded assignments.
    pub async fn list_assignments(&self) -> AppResult<Vec<AssignmentRecord>> {
        self.directory.list_assignments().await
    }

    /// Opens a form over a freshly loaded snapshot.
    pub async fn open_form<A: FormAction>(
        &self,
        action: A,
        input: A::Input,
    ) -> AppResult<SubmissionForm<A>> {
        let snapshot = self.load_snapshot().await?;
        Ok(SubmissionForm::new(
            action,
            snapshot,
            input,
            self.form_settings.clone(),
        ))
    }

    /// Validates and submits a form through the configured gateway.
    pub async fn submit<A: FormAction>(
        &self,
        form: &mut SubmissionForm<A>,
    ) -> Result<FormOutcome<A::Created>, LifecycleError> {
        form.submit(self.gateway.as_ref()).await
    }
}
