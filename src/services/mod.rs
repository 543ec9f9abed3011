//! Services module - HTTP handlers grouped by concern

pub mod admin;
pub mod invitation;
pub mod listing;

// Re-exports to ease imports
pub use admin::admin_set_invitation_status;
pub use invitation::{create_invitation, get_invitation, respond_to_invitation};
pub use listing::list_invitations;

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - liveness probe
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
