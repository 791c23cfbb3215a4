use serde::Serialize;
use ts_rs::TS;

mod conversions;
mod directory;
mod submissions;

pub use directory::{
    AssignmentResponse, PermissionResponse, RoleResponse, StoreResponse, UserResponse,
};
pub use submissions::{
    AssignPermissionsRequest, CreateAssignmentRequest, CreateHierarchyLinkRequest,
    CreateRoleRequest, CreateStoreHierarchyLinkRequest, HierarchyLinkResponse,
    PermissionAssignmentResponse, StoreHierarchyLinkResponse, SubmittedResponse,
    ValidationErrorResponse,
};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}
