use axum_test::TestServer;
use matchlink::core::AppState;
use sqlx::SqlitePool;
use std::sync::Arc;

/// JWT secret shared by the test state and the minted tokens
pub const TEST_JWT_SECRET: &str = "testsecretthatabsolutelymustbechanged";

/// Creates an AppState for the tests
///
/// # Arguments
/// * `pool` - SQLite connection pool provided by `#[sqlx::test]`
///
/// # Returns
/// Arc<AppState> configured with the test JWT secret
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, TEST_JWT_SECRET.to_string()))
}

/// Creates a TestServer for the tests
///
/// # Arguments
/// * `state` - AppState to run the server with
///
/// # Returns
/// TestServer ready to execute requests against the real router
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = matchlink::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Mints a JWT for testing, valid for 24 hours
///
/// # Arguments
/// * `user_id` - ID of the user to impersonate
/// * `username` - Username of the user
pub fn create_test_jwt(user_id: i64, username: &str) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Claims {
        id: i64,
        username: String,
        exp: usize,
        iat: usize,
    }

    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        id: user_id,
        username: username.to_string(),
        exp: expiration,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to create JWT token")
}
