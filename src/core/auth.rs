//! Authentication and authorization
//!
//! Token *issuance* belongs to the external identity service; this module
//! only verifies bearer tokens, resolves them to an identity row and exposes
//! the stateless guards used by the handlers.

use crate::core::{AppError, AppState};
use crate::entities::{Invitation, User, UserRole};
use crate::repositories::Read;
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use jsonwebtoken::{DecodingKey, TokenData, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Contents of the JWT issued by the identity service
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: i64,
    pub username: String,
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, AppError> {
    debug!("Decoding JWT token");
    decode(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        AppError::unauthorized("Unable to decode token")
    })
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing or malformed authorization header");
            AppError::unauthorized("Please add the JWT token to the header")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header is not a bearer token");
        AppError::unauthorized("Please add the JWT token to the header")
    })?;

    let token_data = decode_jwt(token, &state.jwt_secret)?;

    // Fetch the identity from the database; a deleted identity is treated the
    // same as a missing token
    let current_user = match state.user.read(&token_data.claims.id).await? {
        Some(user) => {
            debug!("User authenticated: {}", user.username);
            user
        }
        None => {
            warn!("Identity {} no longer exists", token_data.claims.id);
            return Err(AppError::unauthorized("You are not an authorized user"));
        }
    };
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Guard for administrative operations
#[instrument(skip(user))]
pub fn require_admin(user: &User) -> Result<(), AppError> {
    if user.role != UserRole::Admin {
        warn!("User {} attempted an admin-only operation", user.user_id);
        return Err(AppError::forbidden("Administrator privileges required"));
    }
    Ok(())
}

/// Guard for operations reserved to the receiver of an invitation.
/// The wire response is indistinguishable from a missing record; the real
/// reason is only logged.
#[instrument(skip(invitation))]
pub fn require_receiver(invitation: &Invitation, caller_id: i64) -> Result<(), AppError> {
    if invitation.receiver_id != caller_id {
        warn!(
            "User {} is not the receiver of invitation {}",
            caller_id, invitation.invitation_id
        );
        return Err(AppError::not_found("Invitation not found"));
    }
    Ok(())
}

/// Guard against self-invitations
pub fn require_not_self(sender_id: i64, target_id: i64) -> Result<(), AppError> {
    if sender_id == target_id {
        warn!("User {} attempted to invite themselves", sender_id);
        return Err(AppError::bad_request(
            "You cannot send an invitation to yourself",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::InvitationStatus;
    use chrono::Utc;

    fn user(id: i64, role: UserRole) -> User {
        User {
            user_id: id,
            username: format!("user{}", id),
            role,
        }
    }

    fn invitation(sender_id: i64, receiver_id: i64) -> Invitation {
        let now = Utc::now();
        Invitation {
            invitation_id: 1,
            sender_id,
            receiver_id,
            status: InvitationStatus::Pending,
            message: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user(1, UserRole::Admin)).is_ok());
        assert!(require_admin(&user(2, UserRole::User)).is_err());
    }

    #[test]
    fn test_require_receiver() {
        let inv = invitation(1, 2);
        assert!(require_receiver(&inv, 2).is_ok());
        // neither the sender nor a third party may answer
        assert!(require_receiver(&inv, 1).is_err());
        assert!(require_receiver(&inv, 3).is_err());
    }

    #[test]
    fn test_require_not_self() {
        assert!(require_not_self(1, 2).is_ok());
        assert!(require_not_self(1, 1).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage_token() {
        assert!(decode_jwt("not-a-token", "secret").is_err());
    }
}
