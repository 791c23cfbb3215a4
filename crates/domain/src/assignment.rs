use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::directory::{DirectorySnapshot, StoreId, UserId};
use crate::role::RoleId;
use crate::validation::{FieldError, FieldErrors, ValidationError, require_text};

/// Which references an assignment binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    /// A user holds a role everywhere.
    UserToRole,
    /// A store is bound to a role.
    StoreToRole,
    /// A user holds a role at one store.
    UserToRoleAtStore,
}

impl AssignmentKind {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserToRole => "user_to_role",
            Self::StoreToRole => "store_to_role",
            Self::UserToRoleAtStore => "user_to_role_at_store",
        }
    }

    /// Returns true when the kind needs a user reference.
    #[must_use]
    pub fn requires_user(&self) -> bool {
        matches!(self, Self::UserToRole | Self::UserToRoleAtStore)
    }

    /// Returns true when the kind needs a store reference.
    #[must_use]
    pub fn requires_store(&self) -> bool {
        matches!(self, Self::StoreToRole | Self::UserToRoleAtStore)
    }
}

impl FromStr for AssignmentKind {
    type Err = FieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user_to_role" => Ok(Self::UserToRole),
            "store_to_role" => Ok(Self::StoreToRole),
            "user_to_role_at_store" => Ok(Self::UserToRoleAtStore),
            _ => Err(FieldError::UnknownAssignmentKind),
        }
    }
}

/// Raw values of the assignment form.
///
/// References the selected kind does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInput {
    /// Selected assignment kind, as sent by the client.
    pub kind: Option<String>,
    /// Selected user.
    pub user_id: Option<UserId>,
    /// Selected role.
    pub role_id: Option<RoleId>,
    /// Selected store.
    pub store_id: Option<StoreId>,
}

/// Validated binding of a user and/or store to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Assignment {
    /// A user holds a role everywhere.
    UserToRole {
        /// Assigned user.
        user_id: UserId,
        /// Granted role.
        role_id: RoleId,
    },
    /// A store is bound to a role.
    StoreToRole {
        /// Assigned store.
        store_id: StoreId,
        /// Granted role.
        role_id: RoleId,
    },
    /// A user holds a role at one store.
    UserToRoleAtStore {
        /// Assigned user.
        user_id: UserId,
        /// Granted role.
        role_id: RoleId,
        /// Store the grant is limited to.
        store_id: StoreId,
    },
}

impl Assignment {
    /// Returns the assignment kind.
    #[must_use]
    pub fn kind(&self) -> AssignmentKind {
        match self {
            Self::UserToRole { .. } => AssignmentKind::UserToRole,
            Self::StoreToRole { .. } => AssignmentKind::StoreToRole,
            Self::UserToRoleAtStore { .. } => AssignmentKind::UserToRoleAtStore,
        }
    }

    /// Returns the granted role.
    #[must_use]
    pub fn role_id(&self) -> RoleId {
        match self {
            Self::UserToRole { role_id, .. }
            | Self::StoreToRole { role_id, .. }
            | Self::UserToRoleAtStore { role_id, .. } => *role_id,
        }
    }

    /// Returns the assigned user, if the kind has one.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::UserToRole { user_id, .. } | Self::UserToRoleAtStore { user_id, .. } => {
                Some(*user_id)
            }
            Self::StoreToRole { .. } => None,
        }
    }

    /// Returns the store, if the kind has one.
    #[must_use]
    pub fn store_id(&self) -> Option<StoreId> {
        match self {
            Self::StoreToRole { store_id, .. } | Self::UserToRoleAtStore { store_id, .. } => {
                Some(*store_id)
            }
            Self::UserToRole { .. } => None,
        }
    }
}

/// Validates an assignment form against the loaded users, roles and stores.
pub fn validate_assignment(
    snapshot: &DirectorySnapshot,
    input: &AssignmentInput,
) -> Result<Assignment, ValidationError> {
    let mut errors = FieldErrors::new();

    // Without a known kind the user and store fields cannot be judged.
    let kind = errors.check("kind", parse_kind(input.kind.as_deref()));

    let user_id = if kind.is_some_and(|kind| kind.requires_user()) {
        errors.check("user_id", snapshot.require_user(input.user_id))
    } else {
        None
    };
    let role_id = errors.check(
        "role_id",
        snapshot.require_role(input.role_id).map(|role| role.id()),
    );
    let store_id = if kind.is_some_and(|kind| kind.requires_store()) {
        errors.check("store_id", snapshot.require_store(input.store_id))
    } else {
        None
    };

    let assignment = kind.and_then(|kind| match kind {
        AssignmentKind::UserToRole => user_id
            .zip(role_id)
            .map(|(user_id, role_id)| Assignment::UserToRole { user_id, role_id }),
        AssignmentKind::StoreToRole => store_id
            .zip(role_id)
            .map(|(store_id, role_id)| Assignment::StoreToRole { store_id, role_id }),
        AssignmentKind::UserToRoleAtStore => user_id.zip(role_id).zip(store_id).map(
            |((user_id, role_id), store_id)| Assignment::UserToRoleAtStore {
                user_id,
                role_id,
                store_id,
            },
        ),
    });

    errors.into_result(assignment)
}

fn parse_kind(value: Option<&str>) -> Result<AssignmentKind, FieldError> {
    let value = require_text(value.unwrap_or_default())?;
    value.as_str().parse()
}
