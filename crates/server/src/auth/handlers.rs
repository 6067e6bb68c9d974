//! # Authentication Handlers
//!
//! Inner handlers for the authentication endpoints. Router wrappers do the
//! extraction; these functions hold the behavior.

use ::auth::secrecy::SecretString;
use ::auth::{hash_password, validate_password_strength};
use axum::http::{header, HeaderMap};
use axum::Json;
use chrono::Utc;
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use tracing::info;
use validator::Validate;

use crate::dto::auth::{LoginRequest, LoginResponse, MeResponse, SetupPasswordRequest, UserInfo};
use crate::dto::SuccessResponse;
use crate::middleware::auth::{extract_bearer_token, AuthenticatedUser};
use crate::verification::PLACEHOLDER_PASSWORD_HASH;
use crate::{audit, sessions, AppState};

/// Handles user login.
///
/// # Errors
///
/// Returns a generic authentication error for unknown emails, wrong
/// passwords and inactive accounts alike.
pub async fn login_handler_inner(state: &AppState, req: LoginRequest) -> Result<Json<LoginResponse>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    let user = sessions::authenticate(&state.db, &req.email, &req.password).await?;
    let issued = sessions::create_session(&state.db, user.id, req.remember_me).await?;

    audit::log_account_event(
        &state.db,
        Some(user.id),
        "login",
        format!("User '{}' logged in", user.email),
        Some(user.id),
        None,
    )
    .await;

    info!(user_id = %user.id, "Login succeeded");

    Ok(Json(LoginResponse {
        success:       true,
        user:          UserInfo::from(&user),
        token:         issued.token,
        expires_at:    issued.expires_at,
        redirect_path: sessions::redirect_path_for(&user.role).to_string(),
    }))
}

/// Handles logout by revoking the presented bearer session.
pub async fn logout_handler_inner(state: &AppState, headers: HeaderMap) -> Result<Json<SuccessResponse>> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or_else(|| AppError::auth("Missing authorization header"))?;

    sessions::revoke_session(&state.db, &token).await?;

    Ok(Json(SuccessResponse::new("Logged out")))
}

/// Resolves the current session to its user.
pub async fn me_handler_inner(state: &AppState, authenticated: AuthenticatedUser) -> Result<Json<MeResponse>> {
    let user = entity::users::Entity::find_by_id(authenticated.id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::auth("Invalid or expired token"))?;

    Ok(Json(MeResponse {
        success: true,
        user:    UserInfo::from(&user),
    }))
}

/// Completes password setup for a provisioned account.
///
/// Hashes the password, activates the account, stamps `last_login` and
/// issues a session: setup doubles as the first login. Only accounts still
/// carrying the provisioning placeholder can go through this flow.
pub async fn setup_password_handler_inner(state: &AppState, req: SetupPasswordRequest) -> Result<Json<LoginResponse>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    let user = entity::users::Entity::find_by_id(req.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if user.password_hash != PLACEHOLDER_PASSWORD_HASH {
        return Err(AppError::conflict("Password has already been set for this account"));
    }

    validate_password_strength(&req.password).map_err(|errors| {
        let detail = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
        AppError::validation(detail)
    })?;

    let password = SecretString::from(req.password);
    let hash = hash_password(&password).map_err(|e| AppError::internal(e))?;

    let user_id = user.id;
    let mut active: entity::users::ActiveModel = user.into();
    active.password_hash = Set(::auth::secrecy::ExposeSecret::expose_secret(&hash).to_string());
    active.is_active = Set(true);
    active.last_login = Set(Some(Utc::now()));
    active.updated_at = Set(Utc::now());
    let user = active.update(&state.db).await?;

    audit::log_account_event(
        &state.db,
        Some(user_id),
        "password_setup",
        format!("User '{}' completed password setup", user.email),
        Some(user_id),
        None,
    )
    .await;

    let issued = sessions::create_session(&state.db, user_id, false).await?;

    info!(user_id = %user_id, "Password setup completed");

    Ok(Json(LoginResponse {
        success:       true,
        user:          UserInfo::from(&user),
        token:         issued.token,
        expires_at:    issued.expires_at,
        redirect_path: sessions::redirect_path_for(&user.role).to_string(),
    }))
}
