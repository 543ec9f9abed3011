//! MatchLink server library - exposes the application modules for the binary
//! and the integration tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod monitoring;
pub mod repositories;
pub mod services;

// Re-export the main types to ease imports
pub use crate::core::{AppError, AppState, auth, config};
pub use crate::services::root;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Builds the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/invitations", configure_invitation_routes(state.clone()))
        .nest("/admin", configure_admin_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Routes for sending, answering and listing invitations
fn configure_invitation_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use crate::services::*;

    Router::new()
        .route("/", post(create_invitation).get(list_invitations))
        .route("/{invitation_id}", get(get_invitation))
        .route("/{invitation_id}/{action}", post(respond_to_invitation))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Routes for administrative overrides
fn configure_admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use crate::services::*;

    Router::new()
        .route(
            "/invitations/{invitation_id}/status",
            patch(admin_set_invitation_status),
        )
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
