//! ProfileRepository - read-only access to externally managed profiles

use super::Read;
use crate::entities::{Profile, ProfileStatus};
use sqlx::{Error, QueryBuilder, Sqlite, SqlitePool};

const PROFILE_COLUMNS: &str = "profile_id, user_id, display_name, age, location, phone, \
     photo_url, is_verified, is_premium, status, created_at";

pub struct ProfileRepository {
    connection_pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Lookup restricted to approved profiles; used to validate invitation
    /// targets at creation time.
    pub async fn find_approved(&self, profile_id: &i64) -> Result<Option<Profile>, Error> {
        sqlx::query_as::<_, Profile>(
            "SELECT profile_id, user_id, display_name, age, location, phone, \
             photo_url, is_verified, is_premium, status, created_at \
             FROM profiles WHERE profile_id = ? AND status = ?",
        )
        .bind(profile_id)
        .bind(ProfileStatus::Approved)
        .fetch_optional(&self.connection_pool)
        .await
    }

    /// A user has at most one profile
    pub async fn find_by_user_id(&self, user_id: &i64) -> Result<Option<Profile>, Error> {
        sqlx::query_as::<_, Profile>(
            "SELECT profile_id, user_id, display_name, age, location, phone, \
             photo_url, is_verified, is_premium, status, created_at \
             FROM profiles WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.connection_pool)
        .await
    }

    /// Batch lookup used when projecting a page of invitations
    /// (single WHERE IN query instead of one query per record).
    pub async fn find_by_user_ids(&self, user_ids: &[i64]) -> Result<Vec<Profile>, Error> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query_builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM profiles WHERE user_id IN (",
            PROFILE_COLUMNS
        ));
        let mut separated = query_builder.separated(", ");
        for user_id in user_ids {
            separated.push_bind(*user_id);
        }
        query_builder.push(")");

        query_builder
            .build_query_as::<Profile>()
            .fetch_all(&self.connection_pool)
            .await
    }
}

impl Read<Profile, i64> for ProfileRepository {
    async fn read(&self, id: &i64) -> Result<Option<Profile>, Error> {
        sqlx::query_as::<_, Profile>(
            "SELECT profile_id, user_id, display_name, age, location, phone, \
             photo_url, is_verified, is_premium, status, created_at \
             FROM profiles WHERE profile_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
