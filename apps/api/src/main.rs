//! Rolekeeper API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use rolekeeper_application::RoleAdminService;
use rolekeeper_core::AppError;
use rolekeeper_infrastructure::InMemoryRoleAdminBackend;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let address = config.socket_address()?;

    let backend = Arc::new(InMemoryRoleAdminBackend::new());
    if config.seed_directory {
        dev_seed::run(&backend).await;
    }

    let app_state = AppState {
        role_admin_service: RoleAdminService::new(
            backend.clone(),
            backend,
            config.form_settings(),
        ),
    };
    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "rolekeeper-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
