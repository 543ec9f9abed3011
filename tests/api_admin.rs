//! Integration tests for the administrative endpoints
//!
//! Tests for:
//! - PATCH /admin/invitations/{invitation_id}/status

mod common;

#[cfg(test)]
mod admin_tests {
    use super::common::*;
    use serde_json::{Value, json};
    use sqlx::SqlitePool;

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "profiles", "invitations")))]
    async fn test_override_requires_admin(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server
            .patch("/admin/invitations/111/status")
            .authorization_bearer(&create_test_jwt(1, "alice"))
            .json(&json!({ "status": "Declined" }))
            .await;

        response.assert_status_forbidden();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "profiles", "invitations")))]
    async fn test_override_requires_auth(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server
            .patch("/admin/invitations/111/status")
            .json(&json!({ "status": "Declined" }))
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "profiles", "invitations")))]
    async fn test_override_sets_any_status(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        // 104 is declined, a terminal state for normal operations
        let response = server
            .patch("/admin/invitations/104/status")
            .authorization_bearer(&create_test_jwt(9, "root"))
            .json(&json!({ "status": "Accepted" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "Accepted");

        let reread = server
            .get("/invitations/104")
            .authorization_bearer(&create_test_jwt(9, "root"))
            .await;
        reread.assert_status_ok();
        let reread: Value = reread.json();
        assert_eq!(reread["status"], "Accepted");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "profiles", "invitations")))]
    async fn test_override_is_idempotent(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let first = server
            .patch("/admin/invitations/111/status")
            .authorization_bearer(&create_test_jwt(9, "root"))
            .json(&json!({ "status": "Declined" }))
            .await;
        first.assert_status_ok();
        let first: Value = first.json();

        let second = server
            .patch("/admin/invitations/111/status")
            .authorization_bearer(&create_test_jwt(9, "root"))
            .json(&json!({ "status": "Declined" }))
            .await;
        second.assert_status_ok();
        let second: Value = second.json();

        // same observable record apart from updated_at
        assert_eq!(first["invitation_id"], second["invitation_id"]);
        assert_eq!(first["status"], second["status"]);
        assert_eq!(first["sender_id"], second["sender_id"]);
        assert_eq!(first["receiver_id"], second["receiver_id"]);
        assert_eq!(first["created_at"], second["created_at"]);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "profiles", "invitations")))]
    async fn test_override_does_not_reconcile(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        // 111 is alice -> carol pending; reopening 104 (carol -> alice,
        // declined) creates a reverse pending pair, but the override path
        // must not promote anything to mutual
        let response = server
            .patch("/admin/invitations/104/status")
            .authorization_bearer(&create_test_jwt(9, "root"))
            .json(&json!({ "status": "Pending" }))
            .await;

        response.assert_status_ok();
        let reopened: Value = response.json();
        assert_eq!(reopened["status"], "Pending");

        let other = server
            .get("/invitations/111")
            .authorization_bearer(&create_test_jwt(9, "root"))
            .await;
        other.assert_status_ok();
        let other: Value = other.json();
        assert_eq!(other["status"], "Pending");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "profiles", "invitations")))]
    async fn test_override_missing_invitation(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server
            .patch("/admin/invitations/9999/status")
            .authorization_bearer(&create_test_jwt(9, "root"))
            .json(&json!({ "status": "Declined" }))
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "profiles", "invitations")))]
    async fn test_override_rejects_unknown_status_value(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        // "Rejected" is not a status in this system
        let response = server
            .patch("/admin/invitations/111/status")
            .authorization_bearer(&create_test_jwt(9, "root"))
            .json(&json!({ "status": "Rejected" }))
            .await;

        response.assert_status_unprocessable_entity();
        Ok(())
    }
}
