use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use rolekeeper_application::AssignmentAction;
use rolekeeper_domain::AssignmentInput;

use super::submission::submission_response;
use crate::dto::{AssignmentResponse, CreateAssignmentRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_assignment_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssignmentRequest>,
) -> ApiResult<Response> {
    let input = AssignmentInput::from(payload);

    let service = &state.role_admin_service;
    let mut form = service.open_form(AssignmentAction, input).await?;
    let outcome = service.submit(&mut form).await?;

    submission_response(outcome, |record| {
        Ok((StatusCode::CREATED, AssignmentResponse::from(record)))
    })
}
