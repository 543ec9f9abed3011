//! User entity - the identity row backing authentication

use super::enums::UserRole;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
}
