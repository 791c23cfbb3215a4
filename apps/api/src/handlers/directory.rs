use axum::Json;
use axum::extract::{Path, State};
use rolekeeper_domain::RoleId;

use crate::dto::{
    AssignmentResponse, PermissionResponse, RoleResponse, StoreResponse, UserResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .role_admin_service
        .list_roles()
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_admin_service
        .find_role(RoleId::new(role_id))
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn list_permissions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .role_admin_service
        .list_permissions()
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn list_users_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .role_admin_service
        .list_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn list_stores_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<StoreResponse>>> {
    let stores = state
        .role_admin_service
        .list_stores()
        .await?
        .into_iter()
        .map(StoreResponse::from)
        .collect();

    Ok(Json(stores))
}

pub async fn list_assignments_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AssignmentResponse>>> {
    let assignments = state
        .role_admin_service
        .list_assignments()
        .await?
        .into_iter()
        .map(AssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}
