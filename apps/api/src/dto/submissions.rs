use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::directory::RoleResponse;

/// Incoming payload for role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    #[ts(type = "Array<number>")]
    pub permission_ids: Vec<i64>,
}

/// Incoming payload for a role hierarchy link.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-hierarchy-link-request.ts"
)]
pub struct CreateHierarchyLinkRequest {
    #[ts(type = "number | null")]
    pub higher_role_id: Option<i64>,
    #[ts(type = "number | null")]
    pub lower_role_id: Option<i64>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub reason: String,
}

/// Incoming payload for a store hierarchy link.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-store-hierarchy-link-request.ts"
)]
pub struct CreateStoreHierarchyLinkRequest {
    #[ts(type = "number | null")]
    pub parent_store_id: Option<i64>,
    #[ts(type = "number | null")]
    pub child_store_id: Option<i64>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub reason: String,
}

/// Incoming payload replacing a role's permission set.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-permissions-request.ts"
)]
pub struct AssignPermissionsRequest {
    #[ts(type = "Array<number>")]
    pub permission_ids: Vec<i64>,
}

/// Incoming payload for a user/store assignment.
///
/// `kind` is one of `user_to_role`, `store_to_role`, `user_to_role_at_store`.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-assignment-request.ts"
)]
pub struct CreateAssignmentRequest {
    pub kind: Option<String>,
    #[ts(type = "number | null")]
    pub user_id: Option<i64>,
    #[ts(type = "number | null")]
    pub role_id: Option<i64>,
    #[ts(type = "number | null")]
    pub store_id: Option<i64>,
}

/// API representation of a role hierarchy link.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/hierarchy-link-response.ts"
)]
pub struct HierarchyLinkResponse {
    #[ts(type = "number")]
    pub higher_role_id: i64,
    #[ts(type = "number")]
    pub lower_role_id: i64,
    pub created_by: String,
    pub reason: String,
}

/// API representation of a store hierarchy link.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/store-hierarchy-link-response.ts"
)]
pub struct StoreHierarchyLinkResponse {
    #[ts(type = "number")]
    pub parent_store_id: i64,
    #[ts(type = "number")]
    pub child_store_id: i64,
    pub created_by: String,
    pub reason: String,
}

/// Result of a permission assignment, including the applied change.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-assignment-response.ts"
)]
pub struct PermissionAssignmentResponse {
    pub role: RoleResponse,
    pub changed: bool,
    #[ts(type = "Array<number>")]
    pub added: Vec<i64>,
    #[ts(type = "Array<number>")]
    pub removed: Vec<i64>,
}

/// Envelope for an accepted submission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/submitted-response.ts"
)]
pub struct SubmittedResponse<T> {
    pub data: T,
    /// Milliseconds to wait before navigating away; absent when disabled.
    #[ts(type = "number | null")]
    pub redirect_after_ms: Option<u64>,
}

/// Field errors of a rejected form, rendered all at once.
///
/// `field_codes` carries the machine-readable code of each message, so
/// `unknown_role` and friends can trigger a lookup refresh.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/validation-error-response.ts"
)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub field_errors: BTreeMap<String, String>,
    pub field_codes: BTreeMap<String, String>,
}
