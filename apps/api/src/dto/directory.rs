use serde::Serialize;
use ts_rs::TS;

/// API representation of a role and its bound permissions.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    #[ts(type = "number")]
    pub role_id: i64,
    pub name: String,
    #[ts(type = "Array<number>")]
    pub permission_ids: Vec<i64>,
}

/// API representation of an assignable permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    #[ts(type = "number")]
    pub permission_id: i64,
    pub name: String,
}

/// API representation of a console user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    #[ts(type = "number")]
    pub user_id: i64,
    pub name: String,
}

/// API representation of a store.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/store-response.ts"
)]
pub struct StoreResponse {
    #[ts(type = "number")]
    pub store_id: i64,
    pub name: String,
}

/// API representation of a recorded assignment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assignment-response.ts"
)]
pub struct AssignmentResponse {
    pub kind: String,
    #[ts(type = "number | null")]
    pub user_id: Option<i64>,
    #[ts(type = "number")]
    pub role_id: i64,
    #[ts(type = "number | null")]
    pub store_id: Option<i64>,
    pub assigned_at: String,
}
