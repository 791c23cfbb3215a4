use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::role::{Permission, PermissionId, Role, RoleId};
use crate::validation::FieldError;

/// Backend identifier of a console user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a backend user identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw backend value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Backend identifier of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(i64);

impl StoreId {
    /// Wraps a backend store identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw backend value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl Display for StoreId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// User lookup entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Backend identifier.
    pub id: UserId,
    /// Login or display name.
    pub name: String,
}

impl UserRef {
    /// Creates a user lookup entry.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Store lookup entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRef {
    /// Backend identifier.
    pub id: StoreId,
    /// Store name or code.
    pub name: String,
}

impl StoreRef {
    /// Creates a store lookup entry.
    #[must_use]
    pub fn new(id: StoreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Request-scoped copy of the lookup collections a form validates against.
///
/// Built from whatever the data-fetching layer returned; never shared
/// between form instances. When an id appears twice the last entry wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
    roles: BTreeMap<RoleId, Role>,
    permissions: BTreeMap<PermissionId, Permission>,
    users: BTreeMap<UserId, UserRef>,
    stores: BTreeMap<StoreId, StoreRef>,
}

impl DirectorySnapshot {
    /// Indexes the supplied collections.
    #[must_use]
    pub fn new(
        roles: Vec<Role>,
        permissions: Vec<Permission>,
        users: Vec<UserRef>,
        stores: Vec<StoreRef>,
    ) -> Self {
        Self {
            roles: roles.into_iter().map(|role| (role.id(), role)).collect(),
            permissions: permissions
                .into_iter()
                .map(|permission| (permission.id, permission))
                .collect(),
            users: users.into_iter().map(|user| (user.id, user)).collect(),
            stores: stores.into_iter().map(|store| (store.id, store)).collect(),
        }
    }

    /// Returns roles ordered by id.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    /// Returns permissions ordered by id.
    pub fn permissions(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.values()
    }

    /// Returns users ordered by id.
    pub fn users(&self) -> impl Iterator<Item = &UserRef> {
        self.users.values()
    }

    /// Returns stores ordered by id.
    pub fn stores(&self) -> impl Iterator<Item = &StoreRef> {
        self.stores.values()
    }

    /// Finds a loaded role.
    #[must_use]
    pub fn role(&self, role_id: RoleId) -> Option<&Role> {
        self.roles.get(&role_id)
    }

    /// Returns true when the permission is available.
    #[must_use]
    pub fn contains_permission(&self, permission_id: PermissionId) -> bool {
        self.permissions.contains_key(&permission_id)
    }

    /// Returns true when the user is loaded.
    #[must_use]
    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.users.contains_key(&user_id)
    }

    /// Returns true when the store is loaded.
    #[must_use]
    pub fn contains_store(&self, store_id: StoreId) -> bool {
        self.stores.contains_key(&store_id)
    }

    pub(crate) fn require_role(&self, role_id: Option<RoleId>) -> Result<&Role, FieldError> {
        let role_id = role_id.ok_or(FieldError::Required)?;
        self.role(role_id).ok_or(FieldError::UnknownRole)
    }

    pub(crate) fn require_user(&self, user_id: Option<UserId>) -> Result<UserId, FieldError> {
        let user_id = user_id.ok_or(FieldError::Required)?;
        if self.contains_user(user_id) {
            Ok(user_id)
        } else {
            Err(FieldError::UnknownUser)
        }
    }

    pub(crate) fn require_store(&self, store_id: Option<StoreId>) -> Result<StoreId, FieldError> {
        let store_id = store_id.ok_or(FieldError::Required)?;
        if self.contains_store(store_id) {
            Ok(store_id)
        } else {
            Err(FieldError::UnknownStore)
        }
    }

    /// Collects the selection, naming every id that is not available.
    pub(crate) fn require_permissions(
        &self,
        selected: impl IntoIterator<Item = PermissionId>,
    ) -> Result<BTreeSet<PermissionId>, FieldError> {
        let selected: BTreeSet<PermissionId> = selected.into_iter().collect();
        let unknown: Vec<PermissionId> = selected
            .iter()
            .copied()
            .filter(|permission_id| !self.contains_permission(*permission_id))
            .collect();

        if unknown.is_empty() {
            Ok(selected)
        } else {
            Err(FieldError::UnknownPermissions(unknown))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_duplicate_entries_replace_earlier_ones() {
        let snapshot = DirectorySnapshot::new(
            vec![
                Role::new(RoleId::new(1), "Manager", []),
                Role::new(RoleId::new(1), "Store Manager", []),
            ],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );

        assert_eq!(snapshot.roles().count(), 1);
        assert_eq!(
            snapshot.role(RoleId::new(1)).map(Role::name),
            Some("Store Manager")
        );
    }

    #[test]
    fn missing_and_unknown_references_are_reported_differently() {
        let snapshot = DirectorySnapshot::new(
            Vec::new(),
            Vec::new(),
            vec![UserRef::new(UserId::new(4), "jdoe")],
            Vec::new(),
        );

        assert_eq!(snapshot.require_user(None), Err(FieldError::Required));
        assert_eq!(
            snapshot.require_user(Some(UserId::new(5))),
            Err(FieldError::UnknownUser)
        );
        assert_eq!(
            snapshot.require_user(Some(UserId::new(4))),
            Ok(UserId::new(4))
        );
        assert_eq!(
            snapshot.require_store(Some(StoreId::new(1))),
            Err(FieldError::UnknownStore)
        );
    }

    #[test]
    fn unknown_permissions_are_named_once_in_order() {
        let snapshot = DirectorySnapshot::new(
            Vec::new(),
            vec![Permission::new(PermissionId::new(10), "orders.read")],
            Vec::new(),
            Vec::new(),
        );

        let result = snapshot.require_permissions([
            PermissionId::new(13),
            PermissionId::new(10),
            PermissionId::new(12),
            PermissionId::new(13),
        ]);

        assert_eq!(
            result,
            Err(FieldError::UnknownPermissions(vec![
                PermissionId::new(12),
                PermissionId::new(13),
            ]))
        );
    }
}
