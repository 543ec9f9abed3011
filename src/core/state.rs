//! Application State - Global application state
//!
//! Holds the repositories and shared configuration needed by every route and
//! middleware.

use crate::repositories::{InvitationRepository, ProfileRepository, UserRepository};
use sqlx::SqlitePool;

/// Global application state shared across routes and middleware
pub struct AppState {
    /// Repository for identity rows (consumed by authentication)
    pub user: UserRepository,

    /// Repository for profiles (read-only, external data)
    pub profile: ProfileRepository,

    /// Repository for invitations and the reconciliation engine
    pub invitation: InvitationRepository,

    /// Secret key for JWT verification
    pub jwt_secret: String,
}

impl AppState {
    /// Creates a new AppState wiring every repository to the given pool.
    pub fn new(pool: SqlitePool, jwt_secret: String) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            profile: ProfileRepository::new(pool.clone()),
            invitation: InvitationRepository::new(pool),
            jwt_secret,
        }
    }
}
