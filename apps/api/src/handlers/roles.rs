use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use rolekeeper_application::{
    CreateRoleAction, PermissionAssignmentAction, PermissionAssignmentOutcome,
};
use rolekeeper_core::AppError;
use rolekeeper_domain::{NewRoleInput, PermissionAssignmentInput, PermissionId, RoleId};

use super::submission::submission_response;
use crate::dto::{
    AssignPermissionsRequest, CreateRoleRequest, PermissionAssignmentResponse, RoleResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_role_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<Response> {
    let service = &state.role_admin_service;
    let mut form = service
        .open_form(CreateRoleAction, NewRoleInput::from(payload))
        .await?;
    let outcome = service.submit(&mut form).await?;

    submission_response(outcome, |role| {
        Ok((StatusCode::CREATED, RoleResponse::from(role)))
    })
}

/// Replaces the permission set of a role.
///
/// An unchanged selection answers `200` without contacting the backend.
pub async fn assign_permissions_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
    Json(payload): Json<AssignPermissionsRequest>,
) -> ApiResult<Response> {
    let service = &state.role_admin_service;
    let input = PermissionAssignmentInput {
        role_id: Some(RoleId::new(role_id)),
        permission_ids: payload
            .permission_ids
            .into_iter()
            .map(PermissionId::new)
            .collect(),
    };

    let mut form = service
        .open_form(PermissionAssignmentAction, input)
        .await?;
    let outcome = service.submit(&mut form).await?;

    submission_response(outcome, |created| match created {
        PermissionAssignmentOutcome::Applied { role, delta } => Ok((
            StatusCode::CREATED,
            PermissionAssignmentResponse {
                role: RoleResponse::from(role),
                changed: true,
                added: delta.added.iter().map(|id| id.value()).collect(),
                removed: delta.removed.iter().map(|id| id.value()).collect(),
            },
        )),
        PermissionAssignmentOutcome::Unchanged { role_id } => {
            let role = form.snapshot().role(role_id).cloned().ok_or_else(|| {
                AppError::NotFound(format!("role '{role_id}' does not exist"))
            })?;

            Ok((
                StatusCode::OK,
                PermissionAssignmentResponse {
                    role: RoleResponse::from(role),
                    changed: false,
                    added: Vec::new(),
                    removed: Vec::new(),
                },
            ))
        }
    })
}
