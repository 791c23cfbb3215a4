use rolekeeper_core::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::directory::{DirectorySnapshot, StoreId};
use crate::role::RoleId;
use crate::validation::{FieldError, FieldErrors, ValidationError, require_text};

/// Raw values of the role hierarchy form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyLinkInput {
    /// Selected parent role.
    pub higher_role_id: Option<RoleId>,
    /// Selected child role.
    pub lower_role_id: Option<RoleId>,
    /// Actor recorded on the link.
    pub created_by: String,
    /// Free text, no constraints.
    pub reason: String,
}

/// Directed parent/child relationship between two distinct roles.
///
/// Immutable once created; uniqueness of the pair is owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyLink {
    /// Parent role.
    pub higher_role_id: RoleId,
    /// Child role.
    pub lower_role_id: RoleId,
    /// Actor recorded on the link.
    pub created_by: NonEmptyString,
    /// Free text, possibly empty.
    pub reason: String,
}

/// Validates a role hierarchy submission against the loaded roles.
pub fn validate_hierarchy_link(
    snapshot: &DirectorySnapshot,
    input: &HierarchyLinkInput,
) -> Result<HierarchyLink, ValidationError> {
    let mut errors = FieldErrors::new();

    let higher = errors.check(
        "higher_role_id",
        snapshot.require_role(input.higher_role_id).map(|role| role.id()),
    );
    let lower = errors.check(
        "lower_role_id",
        snapshot.require_role(input.lower_role_id).map(|role| role.id()),
    );
    reject_same_pair(
        &mut errors,
        ("higher_role_id", input.higher_role_id, "higher role"),
        ("lower_role_id", input.lower_role_id, "lower role"),
    );
    let created_by = errors.check("created_by", require_text(input.created_by.as_str()));

    errors.into_result(higher.zip(lower).zip(created_by).map(
        |((higher_role_id, lower_role_id), created_by)| HierarchyLink {
            higher_role_id,
            lower_role_id,
            created_by,
            reason: input.reason.clone(),
        },
    ))
}

/// Raw values of the store hierarchy form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHierarchyLinkInput {
    /// Selected parent store.
    pub parent_store_id: Option<StoreId>,
    /// Selected child store.
    pub child_store_id: Option<StoreId>,
    /// Actor recorded on the link.
    pub created_by: String,
    /// Free text, no constraints.
    pub reason: String,
}

/// Directed parent/child relationship between two distinct stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHierarchyLink {
    /// Parent store.
    pub parent_store_id: StoreId,
    /// Child store.
    pub child_store_id: StoreId,
    /// Actor recorded on the link.
    pub created_by: NonEmptyString,
    /// Free text, possibly empty.
    pub reason: String,
}

/// Validates a store hierarchy submission against the loaded stores.
pub fn validate_store_hierarchy_link(
    snapshot: &DirectorySnapshot,
    input: &StoreHierarchyLinkInput,
) -> Result<StoreHierarchyLink, ValidationError> {
    let mut errors = FieldErrors::new();

    let parent = errors.check(
        "parent_store_id",
        snapshot.require_store(input.parent_store_id),
    );
    let child = errors.check("child_store_id", snapshot.require_store(input.child_store_id));
    reject_same_pair(
        &mut errors,
        ("parent_store_id", input.parent_store_id, "parent store"),
        ("child_store_id", input.child_store_id, "child store"),
    );
    let created_by = errors.check("created_by", require_text(input.created_by.as_str()));

    errors.into_result(parent.zip(child).zip(created_by).map(
        |((parent_store_id, child_store_id), created_by)| StoreHierarchyLink {
            parent_store_id,
            child_store_id,
            created_by,
            reason: input.reason.clone(),
        },
    ))
}

/// Flags both slots when the same entity was picked twice.
///
/// Each slot names the other one, e.g. the higher field reads
/// "must differ from lower role".
fn reject_same_pair<Id: PartialEq>(
    errors: &mut FieldErrors,
    (first_field, first, first_label): (&'static str, Option<Id>, &'static str),
    (second_field, second, second_label): (&'static str, Option<Id>, &'static str),
) {
    let (Some(first), Some(second)) = (first, second) else {
        return;
    };

    if first == second {
        errors.insert(first_field, FieldError::MustDiffer(second_label));
        errors.insert(second_field, FieldError::MustDiffer(first_label));
    }
}

#[cfg(test)]
mod tests;
