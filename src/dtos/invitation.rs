//! Invitation DTOs - request bodies and the state-gated projection

use crate::entities::{Invitation, InvitationStatus, Profile};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref MARKUP_RE: Regex = Regex::new(r"<[^>]*>").expect("valid markup pattern");
}

/// Strip markup tags from a free-text message before it is stored.
pub fn strip_markup(text: &str) -> String {
    MARKUP_RE.replace_all(text, "").trim().to_string()
}

/// Body of POST /invitations. The target is named by profile id - the object
/// a browsing user actually has in hand.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateInvitationDTO {
    pub receiver_profile_id: i64,
    #[validate(length(max = 500, message = "message must be at most 500 characters"))]
    pub message: Option<String>,
}

/// Body of the admin status override. An unknown status value is rejected at
/// deserialization.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateInvitationDTO {
    pub status: InvitationStatus,
}

/// Profile card embedded in a projected invitation. `phone` is populated only
/// when the invitation state allows contact disclosure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProfileCardDTO {
    pub profile_id: i64,
    pub user_id: i64,
    pub display_name: String,
    pub age: Option<i64>,
    pub location: Option<String>,
    pub photo_url: Option<String>,
    pub is_verified: bool,
    pub is_premium: bool,
    pub phone: Option<String>,
}

impl ProfileCardDTO {
    fn project(profile: &Profile, reveal_contact: bool) -> Self {
        Self {
            profile_id: profile.profile_id,
            user_id: profile.user_id,
            display_name: profile.display_name.clone(),
            age: profile.age,
            location: profile.location.clone(),
            photo_url: profile.photo_url.clone(),
            is_verified: profile.is_verified,
            is_premium: profile.is_premium,
            phone: if reveal_contact {
                profile.phone.clone()
            } else {
                None
            },
        }
    }
}

/// Caller-visible shape of an invitation, enriched with both profile cards
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EnrichedInvitationDTO {
    pub invitation_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub status: InvitationStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sender: Option<ProfileCardDTO>,
    pub receiver: Option<ProfileCardDTO>,
}

impl EnrichedInvitationDTO {
    /// The visibility projection. Contact fields are withheld from *both*
    /// parties until the connection is confirmed; the other display
    /// attributes are always included when the profile exists.
    pub fn project(
        invitation: Invitation,
        sender_profile: Option<&Profile>,
        receiver_profile: Option<&Profile>,
    ) -> Self {
        let reveal_contact = invitation.status.reveals_contact();
        Self {
            sender: sender_profile.map(|p| ProfileCardDTO::project(p, reveal_contact)),
            receiver: receiver_profile.map(|p| ProfileCardDTO::project(p, reveal_contact)),
            invitation_id: invitation.invitation_id,
            sender_id: invitation.sender_id,
            receiver_id: invitation.receiver_id,
            status: invitation.status,
            message: invitation.message,
            created_at: invitation.created_at,
            updated_at: invitation.updated_at,
        }
    }
}
