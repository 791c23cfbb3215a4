use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use rolekeeper_core::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::directory::DirectorySnapshot;
use crate::validation::{FieldErrors, ValidationError, require_text};

/// Backend identifier of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(i64);

impl RoleId {
    /// Wraps a backend role identifier.
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

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Backend identifier of a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(i64);

impl PermissionId {
    /// Wraps a backend permission identifier.
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

impl Display for PermissionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Atomic capability grantable to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Backend identifier.
    pub id: PermissionId,
    /// Display name.
    pub name: String,
}

impl Permission {
    /// Creates a permission lookup entry.
    #[must_use]
    pub fn new(id: PermissionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Named permission bundle assignable to users and stores.
///
/// A role owns a set of permission references; the identifier never changes
/// once the backend has created the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: String,
    permissions: BTreeSet<PermissionId>,
}

impl Role {
    /// Creates a role lookup entry.
    #[must_use]
    pub fn new(
        id: RoleId,
        name: impl Into<String>,
        permissions: impl IntoIterator<Item = PermissionId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Returns the stable role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the currently bound permission ids.
    #[must_use]
    pub fn permissions(&self) -> &BTreeSet<PermissionId> {
        &self.permissions
    }

    /// Replaces the bound permission set.
    pub fn set_permissions(&mut self, permissions: impl IntoIterator<Item = PermissionId>) {
        self.permissions = permissions.into_iter().collect();
    }
}

/// Raw role creation form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoleInput {
    /// Requested display name.
    pub name: String,
    /// Permissions to bind on creation.
    pub permission_ids: Vec<PermissionId>,
}

/// Validated role creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    /// Display name, trimmed.
    pub name: NonEmptyString,
    /// Permissions to bind on creation.
    pub permission_ids: BTreeSet<PermissionId>,
}

/// Validates a role creation request against the loaded permission set.
///
/// Name uniqueness is enforced by the backend and is not checked here.
pub fn validate_new_role(
    snapshot: &DirectorySnapshot,
    input: &NewRoleInput,
) -> Result<NewRole, ValidationError> {
    let mut errors = FieldErrors::new();

    let name = errors.check("name", require_text(input.name.as_str()));
    let permission_ids = errors.check(
        "permission_ids",
        snapshot.require_permissions(input.permission_ids.iter().copied()),
    );

    errors.into_result(
        name.zip(permission_ids)
            .map(|(name, permission_ids)| NewRole {
                name,
                permission_ids,
            }),
    )
}
