//! Domain entities and invariants for role administration.
//!
//! Everything here is pure: validators take the lookup collections they need
//! as a [`DirectorySnapshot`] and never touch ambient state.

#![forbid(unsafe_code)]

mod assignment;
mod directory;
mod hierarchy;
mod permission_assignment;
mod role;
mod submission;
mod validation;

pub use assignment::{Assignment, AssignmentInput, AssignmentKind, validate_assignment};
pub use directory::{DirectorySnapshot, StoreId, StoreRef, UserId, UserRef};
pub use hierarchy::{
    HierarchyLink, HierarchyLinkInput, StoreHierarchyLink, StoreHierarchyLinkInput,
    validate_hierarchy_link, validate_store_hierarchy_link,
};
pub use permission_assignment::{
    PermissionAssignment, PermissionAssignmentInput, PermissionDelta,
    validate_permission_assignment,
};
pub use role::{NewRole, NewRoleInput, Permission, PermissionId, Role, RoleId, validate_new_role};
pub use submission::{FormState, LifecycleError};
pub use validation::{FieldError, ValidationError};
