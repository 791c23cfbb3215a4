use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use rolekeeper_application::{HierarchyLinkAction, StoreHierarchyLinkAction};
use rolekeeper_domain::{HierarchyLinkInput, StoreHierarchyLinkInput};

use super::submission::submission_response;
use crate::dto::{
    CreateHierarchyLinkRequest, CreateStoreHierarchyLinkRequest, HierarchyLinkResponse,
    StoreHierarchyLinkResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_hierarchy_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateHierarchyLinkRequest>,
) -> ApiResult<Response> {
    let service = &state.role_admin_service;
    let mut form = service
        .open_form(HierarchyLinkAction, HierarchyLinkInput::from(payload))
        .await?;
    let outcome = service.submit(&mut form).await?;

    submission_response(outcome, |link| {
        Ok((StatusCode::CREATED, HierarchyLinkResponse::from(link)))
    })
}

pub async fn create_store_hierarchy_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateStoreHierarchyLinkRequest>,
) -> ApiResult<Response> {
    let service = &state.role_admin_service;
    let mut form = service
        .open_form(
            StoreHierarchyLinkAction,
            StoreHierarchyLinkInput::from(payload),
        )
        .await?;
    let outcome = service.submit(&mut form).await?;

    submission_response(outcome, |link| {
        Ok((StatusCode::CREATED, StoreHierarchyLinkResponse::from(link)))
    })
}
