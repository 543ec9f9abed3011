//! Entities module - Domain records persisted in the database
//!
//! Each entity corresponds to one table. Invitations are owned by this
//! service; users and profiles are written by external systems and consumed
//! read-only here.

pub mod enums;
pub mod invitation;
pub mod profile;
pub mod user;

// Re-exports to ease imports
pub use enums::{InvitationStatus, ProfileStatus, UserRole};
pub use invitation::Invitation;
pub use profile::Profile;
pub use user::User;
