//! Profile entity - display attributes and contact data for one user
//!
//! Written by the external profile/moderation system; this service only reads
//! it. The `phone` field is sensitive and must never leave the service except
//! through the visibility projection in `dtos`.

use super::enums::ProfileStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Profile {
    pub profile_id: i64,
    pub user_id: i64,
    pub display_name: String,
    pub age: Option<i64>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub is_verified: bool,
    pub is_premium: bool,
    pub status: ProfileStatus,
    pub created_at: DateTime<Utc>,
}
