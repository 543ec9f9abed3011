//! Query DTOs - Data Transfer Objects for query parameters

use crate::entities::InvitationStatus;
use serde::{Deserialize, Serialize};

/// Query parameters of GET /invitations
#[derive(Serialize, Deserialize, Debug)]
pub struct ListInvitationsQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub status: Option<InvitationStatus>,
}
