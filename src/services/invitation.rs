//! Invitation services - sending, answering and fetching invitations

use crate::core::{AppError, AppState, require_not_self, require_receiver};
use crate::dtos::{CreateInvitationDTO, EnrichedInvitationDTO, strip_markup};
use crate::entities::{Invitation, User, UserRole};
use crate::repositories::{NewInvitation, Read};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use axum_macros::debug_handler;
use futures::future::try_join;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Fetch both profile cards for an invitation and apply the visibility
/// projection.
pub(super) async fn enrich(
    state: &AppState,
    invitation: Invitation,
) -> Result<EnrichedInvitationDTO, AppError> {
    let (sender_profile, receiver_profile) = try_join(
        state.profile.find_by_user_id(&invitation.sender_id),
        state.profile.find_by_user_id(&invitation.receiver_id),
    )
    .await?;
    Ok(EnrichedInvitationDTO::project(
        invitation,
        sender_profile.as_ref(),
        receiver_profile.as_ref(),
    ))
}

#[debug_handler]
#[instrument(skip(state, current_user, body), fields(sender_id = %current_user.user_id, receiver_profile_id = %body.receiver_profile_id))]
pub async fn create_invitation(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateInvitationDTO>,
) -> Result<Json<EnrichedInvitationDTO>, AppError> {
    debug!("Creating invitation");

    body.validate()?;

    // the target must be approved; approval is checked at creation time only
    let receiver_profile = state
        .profile
        .find_approved(&body.receiver_profile_id)
        .await?
        .ok_or_else(|| {
            warn!(
                "Receiver profile {} missing or not approved",
                body.receiver_profile_id
            );
            AppError::not_found("Profile not found")
        })?;

    require_not_self(current_user.user_id, receiver_profile.user_id)?;

    if state
        .invitation
        .find_outstanding(&current_user.user_id, &receiver_profile.user_id)
        .await?
        .is_some()
    {
        warn!(
            "Outstanding invitation already exists for pair ({}, {})",
            current_user.user_id, receiver_profile.user_id
        );
        return Err(AppError::conflict(
            "There is already an outstanding invitation for this profile",
        ));
    }

    let message = body
        .message
        .as_deref()
        .map(strip_markup)
        .filter(|m| !m.is_empty());

    let invitation = state
        .invitation
        .create_reconciled(&NewInvitation {
            sender_id: current_user.user_id,
            receiver_id: receiver_profile.user_id,
            message,
        })
        .await?;

    info!(
        "Invitation {} created as {:?}",
        invitation.invitation_id, invitation.status
    );
    Ok(Json(enrich(&state, invitation).await?))
}

#[instrument(skip(state, current_user), fields(invitation_id = %invitation_id, action = %action, user_id = %current_user.user_id))]
pub async fn respond_to_invitation(
    State(state): State<Arc<AppState>>,
    Path((invitation_id, action)): Path<(i64, String)>,
    Extension(current_user): Extension<User>,
) -> Result<Json<EnrichedInvitationDTO>, AppError> {
    debug!("Responding to invitation");

    let accept = match action.as_str() {
        "accept" => true,
        "decline" => false,
        _ => {
            warn!("Invalid invitation action: {}", action);
            return Err(AppError::bad_request(
                "Action must be 'accept' or 'decline'",
            ));
        }
    };

    let invitation = state
        .invitation
        .read(&invitation_id)
        .await?
        .ok_or_else(|| {
            warn!("Invitation not found: {}", invitation_id);
            AppError::not_found("Invitation not found")
        })?;

    require_receiver(&invitation, current_user.user_id)?;

    let updated = if accept {
        state
            .invitation
            .accept_reconciled(&invitation_id, &current_user.user_id)
            .await?
    } else {
        state
            .invitation
            .decline(&invitation_id, &current_user.user_id)
            .await?
    };

    // already resolved, or lost the race to a concurrent writer; on the wire
    // this is the same as the record not existing
    let invitation = updated.ok_or_else(|| {
        warn!("Invitation {} is no longer pending", invitation_id);
        AppError::not_found("Invitation not found")
    })?;

    info!(
        "Invitation {} is now {:?}",
        invitation.invitation_id, invitation.status
    );
    Ok(Json(enrich(&state, invitation).await?))
}

#[instrument(skip(state, current_user), fields(invitation_id = %invitation_id, user_id = %current_user.user_id))]
pub async fn get_invitation(
    State(state): State<Arc<AppState>>,
    Path(invitation_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<EnrichedInvitationDTO>, AppError> {
    debug!("Fetching invitation");

    let invitation = state
        .invitation
        .read(&invitation_id)
        .await?
        .ok_or_else(|| {
            warn!("Invitation not found: {}", invitation_id);
            AppError::not_found("Invitation not found")
        })?;

    let is_party = invitation.sender_id == current_user.user_id
        || invitation.receiver_id == current_user.user_id;
    if !is_party && current_user.role != UserRole::Admin {
        warn!(
            "User {} is not a party to invitation {}",
            current_user.user_id, invitation_id
        );
        return Err(AppError::not_found("Invitation not found"));
    }

    Ok(Json(enrich(&state, invitation).await?))
}
