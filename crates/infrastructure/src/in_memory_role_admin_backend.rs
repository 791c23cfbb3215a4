use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use rolekeeper_application::{
    AssignmentRecord, DirectoryRepository, RoleAdminGateway, SubmissionError,
};
use rolekeeper_core::AppResult;
use rolekeeper_domain::{
    Assignment, HierarchyLink, NewRole, Permission, PermissionId, Role, RoleId,
    StoreHierarchyLink, StoreId, StoreRef, UserId, UserRef,
};

/// In-memory stand-in for the role administration backend.
///
/// Serves the directory reads and accepts mutations, enforcing the
/// uniqueness rules the real backend owns.
#[derive(Debug, Default)]
pub struct InMemoryRoleAdminBackend {
    roles: RwLock<BTreeMap<RoleId, Role>>,
    permissions: RwLock<BTreeMap<PermissionId, Permission>>,
    users: RwLock<BTreeMap<UserId, UserRef>>,
    stores: RwLock<BTreeMap<StoreId, StoreRef>>,
    hierarchy_links: RwLock<Vec<HierarchyLink>>,
    store_links: RwLock<Vec<StoreHierarchyLink>>,
    assignments: RwLock<Vec<AssignmentRecord>>,
}

impl InMemoryRoleAdminBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a role.
    pub async fn seed_role(&self, role: Role) {
        self.roles.write().await.insert(role.id(), role);
    }

    /// Inserts or replaces a permission.
    pub async fn seed_permission(&self, permission: Permission) {
        self.permissions
            .write()
            .await
            .insert(permission.id, permission);
    }

    /// Inserts or replaces a user.
    pub async fn seed_user(&self, user: UserRef) {
        self.users.write().await.insert(user.id, user);
    }

    /// Inserts or replaces a store.
    pub async fn seed_store(&self, store: StoreRef) {
        self.stores.write().await.insert(store.id, store);
    }

    /// Returns stored role hierarchy links in creation order.
    pub async fn hierarchy_links(&self) -> Vec<HierarchyLink> {
        self.hierarchy_links.read().await.clone()
    }

    /// Returns stored store hierarchy links in creation order.
    pub async fn store_hierarchy_links(&self) -> Vec<StoreHierarchyLink> {
        self.store_links.read().await.clone()
    }

    async fn ensure_role_exists(&self, role_id: RoleId) -> Result<(), SubmissionError> {
        if self.roles.read().await.contains_key(&role_id) {
            return Ok(());
        }

        Err(SubmissionError::rejected(format!(
            "role '{role_id}' does not exist"
        )))
    }

    async fn ensure_permissions_exist(
        &self,
        permission_ids: &BTreeSet<PermissionId>,
    ) -> Result<(), SubmissionError> {
        let permissions = self.permissions.read().await;
        let missing: Vec<String> = permission_ids
            .iter()
            .filter(|permission_id| !permissions.contains_key(*permission_id))
            .map(ToString::to_string)
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(SubmissionError::rejected(format!(
            "permissions do not exist: {}",
            missing.join(", ")
        )))
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> Result<(), SubmissionError> {
        if self.users.read().await.contains_key(&user_id) {
            return Ok(());
        }

        Err(SubmissionError::rejected(format!(
            "user '{user_id}' does not exist"
        )))
    }

    async fn ensure_store_exists(&self, store_id: StoreId) -> Result<(), SubmissionError> {
        if self.stores.read().await.contains_key(&store_id) {
            return Ok(());
        }

        Err(SubmissionError::rejected(format!(
            "store '{store_id}' does not exist"
        )))
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryRoleAdminBackend {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.read().await.values().cloned().collect())
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        Ok(self.permissions.read().await.values().cloned().collect())
    }

    async fn list_users(&self) -> AppResult<Vec<UserRef>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn list_stores(&self) -> AppResult<Vec<StoreRef>> {
        Ok(self.stores.read().await.values().cloned().collect())
    }

    async fn list_assignments(&self) -> AppResult<Vec<AssignmentRecord>> {
        Ok(self.assignments.read().await.clone())
    }
}

#[async_trait]
impl RoleAdminGateway for InMemoryRoleAdminBackend {
    async fn create_role(&self, role: NewRole) -> Result<Role, SubmissionError> {
        self.ensure_permissions_exist(&role.permission_ids).await?;

        let mut roles = self.roles.write().await;
        let name = role.name.as_str();
        let folded = name.to_lowercase();
        if roles
            .values()
            .any(|existing| existing.name().to_lowercase() == folded)
        {
            return Err(SubmissionError::conflict(format!(
                "role '{name}' already exists"
            )));
        }

        let next_id = roles
            .keys()
            .next_back()
            .map_or(1, |last| last.value() + 1);
        let created = Role::new(RoleId::new(next_id), name, role.permission_ids);
        roles.insert(created.id(), created.clone());

        info!(role_id = next_id, "role created");
        Ok(created)
    }

    async fn create_hierarchy_link(
        &self,
        link: HierarchyLink,
    ) -> Result<HierarchyLink, SubmissionError> {
        self.ensure_role_exists(link.higher_role_id).await?;
        self.ensure_role_exists(link.lower_role_id).await?;

        let mut links = self.hierarchy_links.write().await;
        if links.iter().any(|existing| {
            existing.higher_role_id == link.higher_role_id
                && existing.lower_role_id == link.lower_role_id
        }) {
            return Err(SubmissionError::conflict(format!(
                "role '{}' is already above role '{}'",
                link.higher_role_id, link.lower_role_id
            )));
        }

        links.push(link.clone());
        info!(
            higher_role_id = link.higher_role_id.value(),
            lower_role_id = link.lower_role_id.value(),
            created_by = link.created_by.as_str(),
            "role hierarchy link created"
        );
        Ok(link)
    }

    async fn assign_permissions(
        &self,
        role_id: RoleId,
        permission_ids: BTreeSet<PermissionId>,
    ) -> Result<Role, SubmissionError> {
        self.ensure_permissions_exist(&permission_ids).await?;

        let mut roles = self.roles.write().await;
        let Some(role) = roles.get_mut(&role_id) else {
            return Err(SubmissionError::rejected(format!(
                "role '{role_id}' does not exist"
            )));
        };

        role.set_permissions(permission_ids);
        info!(
            role_id = role_id.value(),
            permissions = role.permissions().len(),
            "role permissions replaced"
        );
        Ok(role.clone())
    }

    async fn create_assignment(
        &self,
        assignment: Assignment,
    ) -> Result<AssignmentRecord, SubmissionError> {
        self.ensure_role_exists(assignment.role_id()).await?;
        if let Some(user_id) = assignment.user_id() {
            self.ensure_user_exists(user_id).await?;
        }
        if let Some(store_id) = assignment.store_id() {
            self.ensure_store_exists(store_id).await?;
        }

        let mut assignments = self.assignments.write().await;
        if assignments
            .iter()
            .any(|existing| existing.assignment == assignment)
        {
            return Err(SubmissionError::conflict(format!(
                "{} assignment for role '{}' already exists",
                assignment.kind().as_str(),
                assignment.role_id()
            )));
        }

        let record = AssignmentRecord {
            assignment,
            assigned_at: Utc::now(),
        };
        assignments.push(record.clone());

        info!(
            kind = assignment.kind().as_str(),
            role_id = assignment.role_id().value(),
            "assignment recorded"
        );
        Ok(record)
    }

    async fn create_store_hierarchy_link(
        &self,
        link: StoreHierarchyLink,
    ) -> Result<StoreHierarchyLink, SubmissionError> {
        self.ensure_store_exists(link.parent_store_id).await?;
        self.ensure_store_exists(link.child_store_id).await?;

        let mut links = self.store_links.write().await;
        if links.iter().any(|existing| {
            existing.parent_store_id == link.parent_store_id
                && existing.child_store_id == link.child_store_id
        }) {
            return Err(SubmissionError::conflict(format!(
                "store '{}' is already the parent of store '{}'",
                link.parent_store_id, link.child_store_id
            )));
        }

        links.push(link.clone());
        info!(
            parent_store_id = link.parent_store_id.value(),
            child_store_id = link.child_store_id.value(),
            created_by = link.created_by.as_str(),
            "store hierarchy link created"
        );
        Ok(link)
    }
}

#[cfg(test)]
mod tests;
