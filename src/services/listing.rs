//! Query/listing service - role-scoped, paginated invitation retrieval

use crate::core::{AppError, AppState};
use crate::dtos::{EnrichedInvitationDTO, InvitationListDTO, ListInvitationsQuery, PaginationDTO};
use crate::entities::{Invitation, Profile, User, UserRole};
use crate::repositories::ListScope;
use axum::{
    Extension,
    extract::{Json, Query, State},
};
use futures::future::try_join;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
const MAX_PAGE_LIMIT: u32 = 100;

#[instrument(skip(state, current_user, params), fields(user_id = %current_user.user_id))]
pub async fn list_invitations(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(params): Query<ListInvitationsQuery>,
) -> Result<Json<InvitationListDTO>, AppError> {
    debug!("Listing invitations");

    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT);
    let offset = page.saturating_sub(1).saturating_mul(limit);

    let scope = match current_user.role {
        UserRole::Admin => ListScope::All,
        UserRole::User => ListScope::User(current_user.user_id),
    };

    // counts always cover the whole scope; the status filter narrows the
    // items and the page arithmetic
    let (items, counts) = try_join(
        state.invitation.list(&scope, params.status, limit, offset),
        state.invitation.count_by_status(&scope),
    )
    .await?;

    let filtered_total = match params.status {
        Some(status) => state.invitation.count_filtered(&scope, status).await?,
        None => counts.total,
    };
    let total_pages = (filtered_total.max(0) as u32).div_ceil(limit);

    let items = enrich_page(&state, items).await?;

    info!("Returning {} invitations (page {})", items.len(), page);
    Ok(Json(InvitationListDTO {
        items,
        counts,
        pagination: PaginationDTO {
            page,
            limit,
            total_pages,
        },
    }))
}

/// Project one page of invitations with a single batched profile fetch
async fn enrich_page(
    state: &AppState,
    invitations: Vec<Invitation>,
) -> Result<Vec<EnrichedInvitationDTO>, AppError> {
    let mut user_ids: Vec<i64> = invitations
        .iter()
        .flat_map(|invitation| [invitation.sender_id, invitation.receiver_id])
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let profiles = state.profile.find_by_user_ids(&user_ids).await?;
    let by_user: HashMap<i64, Profile> = profiles
        .into_iter()
        .map(|profile| (profile.user_id, profile))
        .collect();

    Ok(invitations
        .into_iter()
        .map(|invitation| {
            let sender = by_user.get(&invitation.sender_id);
            let receiver = by_user.get(&invitation.receiver_id);
            EnrichedInvitationDTO::project(invitation, sender, receiver)
        })
        .collect())
}
