use axum::Router;
use axum::routing::{get, post, put};
use rolekeeper_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let api_routes = Router::new()
        .route(
            "/api/roles",
            get(handlers::directory::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/api/roles/{role_id}",
            get(handlers::directory::get_role_handler),
        )
        .route(
            "/api/roles/{role_id}/permissions",
            put(handlers::roles::assign_permissions_handler),
        )
        .route(
            "/api/permissions",
            get(handlers::directory::list_permissions_handler),
        )
        .route("/api/users", get(handlers::directory::list_users_handler))
        .route("/api/stores", get(handlers::directory::list_stores_handler))
        .route(
            "/api/role-hierarchy",
            post(handlers::hierarchy::create_hierarchy_link_handler),
        )
        .route(
            "/api/store-hierarchy",
            post(handlers::hierarchy::create_store_hierarchy_link_handler),
        )
        .route(
            "/api/assignments",
            get(handlers::directory::list_assignments_handler)
                .post(handlers::assignments::create_assignment_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
