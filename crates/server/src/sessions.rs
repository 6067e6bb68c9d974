//! # Session Store
//!
//! Opaque bearer sessions backing authentication. Tokens are random 256-bit
//! values handed to the client once; only their BLAKE3 digest is stored.
//! Sessions are hard-deleted on revocation and treated as absent once
//! expired, with lazy cleanup on lookup.

use ::auth::secrecy::SecretString;
use ::auth::{digest_token, generate_token, verify_password};
use chrono::{DateTime, Duration, Utc};
use entity::sessions::{Column, Entity as SessionsEntity};
use entity::users::{Column as UserColumn, Entity as UsersEntity};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, Set};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Lifetime of a normal session.
pub const SESSION_TTL_HOURS: i64 = 24;
/// Lifetime of a "remember me" session.
pub const REMEMBER_ME_TTL_DAYS: i64 = 30;

/// A freshly issued session with its one-time wire token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Session row id
    pub id:         Uuid,
    /// Raw bearer token; never persisted
    pub token:      String,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

/// Authenticates a user by email and password.
///
/// Lookup is case-sensitive. Any failure (unknown email, wrong password,
/// inactive account) yields the same generic error so callers cannot
/// enumerate accounts. A successful authentication stamps `last_login`.
pub async fn authenticate(db: &DbConn, email: &str, password: &str) -> Result<entity::users::Model> {
    let invalid = || AppError::auth("Invalid email or password");

    let user = UsersEntity::find()
        .filter(UserColumn::Email.eq(email))
        .one(db)
        .await?
        .ok_or_else(invalid)?;

    let secret = SecretString::from(password.to_string());
    verify_password(&secret, &user.password_hash).map_err(|_| invalid())?;

    if !user.is_active {
        return Err(invalid());
    }

    let mut active: entity::users::ActiveModel = user.into();
    active.last_login = Set(Some(Utc::now()));
    let user = active.update(db).await?;

    Ok(user)
}

/// Creates a session for a user.
///
/// # Arguments
///
/// * `db` - Database connection
/// * `user_id` - The user the session belongs to
/// * `remember_me` - Extends the lifetime from 24 hours to 30 days
pub async fn create_session(db: &DbConn, user_id: Uuid, remember_me: bool) -> Result<IssuedSession> {
    let token = generate_token();
    let expires_at = if remember_me {
        Utc::now() + Duration::days(REMEMBER_ME_TTL_DAYS)
    }
    else {
        Utc::now() + Duration::hours(SESSION_TTL_HOURS)
    };

    let session = entity::sessions::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        token_hash: Set(digest_token(&token)),
        expires_at: Set(expires_at),
        created_at: Set(Utc::now()),
    };

    let model = session
        .insert(db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create session: {}", e)))?;

    info!(user_id = %user_id, session_id = %model.id, remember_me, "Session created");

    Ok(IssuedSession {
        id: model.id,
        token,
        expires_at,
    })
}

/// Resolves a bearer token to its session.
///
/// Returns `None` for unknown tokens. An expired session is treated as
/// absent and its row is deleted opportunistically.
pub async fn resolve_session(db: &DbConn, token: &str) -> Result<Option<entity::sessions::Model>> {
    let session = SessionsEntity::find()
        .filter(Column::TokenHash.eq(digest_token(token)))
        .one(db)
        .await?;

    let Some(session) = session else {
        return Ok(None);
    };

    if session.expires_at <= Utc::now() {
        debug!(session_id = %session.id, "Dropping expired session on lookup");
        // Best-effort cleanup; an expired token is invalid either way.
        if let Err(e) = SessionsEntity::delete_by_id(session.id).exec(db).await {
            warn!(session_id = %session.id, "Failed to drop expired session: {}", e);
        }
        return Ok(None);
    }

    Ok(Some(session))
}

/// Revokes a session by its bearer token. Hard delete; a revoked token is
/// invalid from the moment this returns.
pub async fn revoke_session(db: &DbConn, token: &str) -> Result<()> {
    SessionsEntity::delete_many()
        .filter(Column::TokenHash.eq(digest_token(token)))
        .exec(db)
        .await?;
    Ok(())
}

/// Revokes every session belonging to a user (logout everywhere).
pub async fn revoke_all_user_sessions(db: &DbConn, user_id: Uuid) -> Result<u64> {
    let result = SessionsEntity::delete_many()
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes all expired session rows. There is no timer-based eviction;
/// this is invoked from operational tooling.
pub async fn cleanup_expired_sessions(db: &DbConn) -> Result<u64> {
    let result = SessionsEntity::delete_many()
        .filter(Column::ExpiresAt.lte(Utc::now()))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!(deleted = result.rows_affected, "Expired sessions reclaimed");
    }

    Ok(result.rows_affected)
}

/// Redirect target after login, branched on role.
#[must_use]
pub fn redirect_path_for(role: &entity::users::UserRole) -> &'static str {
    match role {
        entity::users::UserRole::SystemAdmin => "/admin/dashboard",
        entity::users::UserRole::PortAdmin => "/port/dashboard",
        entity::users::UserRole::User => "/dashboard",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_paths() {
        use entity::users::UserRole;

        assert_eq!(redirect_path_for(&UserRole::SystemAdmin), "/admin/dashboard");
        assert_eq!(redirect_path_for(&UserRole::PortAdmin), "/port/dashboard");
        assert_eq!(redirect_path_for(&UserRole::User), "/dashboard");
    }

    #[test]
    fn test_ttl_constants() {
        assert_eq!(SESSION_TTL_HOURS, 24);
        assert_eq!(REMEMBER_ME_TTL_DAYS, 30);
    }
}
