//! Enumerations - Enumerated types used by the entities

use serde::{Deserialize, Serialize};

/// Invitation lifecycle. `Declined` and `Mutual` are terminal for normal
/// operations; only the admin override moves a record out of them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Mutual,
}

impl InvitationStatus {
    /// Contact fields are disclosed only once the connection is confirmed.
    pub fn reveals_contact(self) -> bool {
        matches!(self, Self::Accepted | Self::Mutual)
    }
}

/// Moderation state of a profile, written by the external moderation flow.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
pub enum ProfileStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_disclosure_by_status() {
        assert!(!InvitationStatus::Pending.reveals_contact());
        assert!(!InvitationStatus::Declined.reveals_contact());
        assert!(InvitationStatus::Accepted.reveals_contact());
        assert!(InvitationStatus::Mutual.reveals_contact());
    }
}
