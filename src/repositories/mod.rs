//! Repositories module - Database access, one repository per entity
//!
//! Queries use the runtime sqlx API; every repository owns a clone of the
//! shared connection pool.

pub mod invitation;
pub mod profile;
pub mod traits;
pub mod user;

// Re-export the traits to ease imports
pub use traits::Read;

// Re-export the repository structs to ease imports
pub use invitation::{InvitationRepository, ListScope, NewInvitation};
pub use profile::ProfileRepository;
pub use user::UserRepository;

/// Whether an error is a busy/locked transaction abort - the transient class
/// that is worth retrying once.
pub(crate) fn is_busy(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .and_then(|code| code.as_ref().parse::<u32>().ok())
        // SQLITE_BUSY = 5, SQLITE_LOCKED = 6, including extended codes
        .map(|code| code & 0xff == 5 || code & 0xff == 6)
        .unwrap_or(false)
}
