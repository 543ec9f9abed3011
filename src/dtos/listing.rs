//! Listing DTOs - the paginated invitation listing response

use super::invitation::EnrichedInvitationDTO;
use serde::{Deserialize, Serialize};

/// Per-status aggregates over the caller's whole scope. `mutual` counts
/// confirmed matches (one per pair); `total` counts records.
#[derive(Serialize, Deserialize, Debug, Clone, Default, sqlx::FromRow)]
pub struct InvitationCountsDTO {
    pub pending: i64,
    pub accepted: i64,
    pub declined: i64,
    pub mutual: i64,
    pub total: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PaginationDTO {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InvitationListDTO {
    pub items: Vec<EnrichedInvitationDTO>,
    pub counts: InvitationCountsDTO,
    pub pagination: PaginationDTO,
}
