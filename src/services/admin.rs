//! Administrative services - operational overrides

use crate::core::{AppError, AppState, require_admin};
use crate::dtos::{EnrichedInvitationDTO, UpdateInvitationDTO};
use crate::entities::User;
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Unconditional status override. An escape hatch for operational correction:
/// it bypasses the reconciliation engine and the terminal-state rules, and it
/// never touches the reverse record.
#[instrument(skip(state, current_user, body), fields(invitation_id = %invitation_id, admin_id = %current_user.user_id, new_status = ?body.status))]
pub async fn admin_set_invitation_status(
    State(state): State<Arc<AppState>>,
    Path(invitation_id): Path<i64>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateInvitationDTO>,
) -> Result<Json<EnrichedInvitationDTO>, AppError> {
    debug!("Admin status override");

    require_admin(&current_user)?;

    let invitation = state
        .invitation
        .set_status(&invitation_id, &body.status)
        .await?
        .ok_or_else(|| {
            warn!("Invitation not found: {}", invitation_id);
            AppError::not_found("Invitation not found")
        })?;

    info!("Invitation {} forced to {:?}", invitation_id, body.status);
    Ok(Json(super::invitation::enrich(&state, invitation).await?))
}
