//! # Authentication Middleware
//!
//! Bearer-session authentication for protected API endpoints. The opaque
//! token from the `Authorization` header is resolved against the session
//! store; the owning user is loaded and attached to the request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use entity::users::UserRole;
use error::AppError;
use sea_orm::EntityTrait;

use crate::{sessions, AppState};

/// User information resolved from the bearer session.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID
    pub id:    uuid::Uuid,
    /// User email
    pub email: String,
    /// User role
    pub role:  UserRole,
}

impl AuthenticatedUser {
    #[must_use]
    pub fn is_system_admin(&self) -> bool {
        self.role == UserRole::SystemAdmin
    }
}

/// Extracts the token from a `Bearer <token>` authorization header value.
#[must_use]
pub fn extract_bearer_token(header: &str) -> Option<String> {
    let (scheme, token) = header.split_once(' ')?;
    if scheme != "Bearer" {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    }
    else {
        Some(token.to_string())
    }
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Resolves it to a live, unexpired session
/// 3. Loads the owning user and adds it to request extensions
/// 4. Rejects requests with missing, invalid or expired tokens
pub async fn auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let auth_header = match request.headers().get(header::AUTHORIZATION) {
        Some(header) => {
            match header.to_str() {
                Ok(h) => h,
                Err(_) => {
                    return auth_error("Invalid authorization header encoding");
                },
            }
        },
        None => {
            return auth_error("Missing authorization header");
        },
    };

    let token = match extract_bearer_token(auth_header) {
        Some(token) => token,
        None => {
            return auth_error("Invalid authorization header format");
        },
    };

    let session = match sessions::resolve_session(&state.db, &token).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            return auth_error("Invalid or expired token");
        },
        Err(e) => {
            tracing::error!("Failed to resolve session: {}", e);
            return e.into_response();
        },
    };

    let user = match entity::users::Entity::find_by_id(session.user_id).one(&state.db).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // Session without a user: cascade delete raced the lookup.
            return auth_error("Invalid or expired token");
        },
        Err(e) => {
            tracing::error!("Failed to load session user: {}", e);
            return AppError::from(e).into_response();
        },
    };

    if !user.is_active {
        return auth_error("Account is inactive");
    }

    let authenticated = AuthenticatedUser {
        id:    user.id,
        email: user.email,
        role:  user.role,
    };
    request.extensions_mut().insert(authenticated);

    next.run(request).await
}

/// Role gate for system-admin-only endpoints. Must run after
/// [`auth_middleware`].
pub async fn require_system_admin(request: Request, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_system_admin() => next.run(request).await,
        Some(_) => AppError::forbidden("System administrator role required").into_response(),
        None => auth_error("Missing authorization header"),
    }
}

fn auth_error(message: &str) -> Response {
    let mut response = AppError::auth(message).into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, header::HeaderValue::from_static("Bearer"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123".to_string()));
        assert_eq!(extract_bearer_token("Bearer   abc123   "), Some("abc123".to_string()));
        assert!(extract_bearer_token("Basic abc123").is_none());
        assert!(extract_bearer_token("Bearer").is_none());
        assert!(extract_bearer_token("Bearer ").is_none());
        assert!(extract_bearer_token("").is_none());
    }

    #[test]
    fn test_auth_error_carries_challenge() {
        let response = auth_error("Missing authorization header");
        assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }
}
