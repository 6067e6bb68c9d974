//! # Authentication Data Transfer Objects
//!
//! Request and response types for authentication endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for user login
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// User's password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Extends the session lifetime from 24 hours to 30 days
    #[serde(default)]
    pub remember_me: bool,
}

/// Request body for completing password setup on a provisioned account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetupPasswordRequest {
    /// The provisioned user's id
    pub user_id: Uuid,

    /// The password to set
    #[validate(length(
        min = 8,
        max = 256,
        message = "Password must be between 8 and 256 characters"
    ))]
    pub password: String,
}

/// User information returned by authentication endpoints. Deliberately
/// omits the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Unique user identifier
    pub id: Uuid,

    /// User's email address
    pub email: String,

    /// User's first name
    pub first_name: Option<String>,

    /// User's last name
    pub last_name: Option<String>,

    /// User's role
    pub role: entity::users::UserRole,

    /// The port this user administers, if any
    pub port_id: Option<Uuid>,
}

impl From<&entity::users::Model> for UserInfo {
    fn from(user: &entity::users::Model) -> Self {
        Self {
            id:         user.id,
            email:      user.email.clone(),
            first_name: user.first_name.clone(),
            last_name:  user.last_name.clone(),
            role:       user.role.clone(),
            port_id:    user.port_id,
        }
    }
}

/// Response for a successful login or password setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Indicates operation success
    pub success: bool,

    /// Authenticated user information
    pub user: UserInfo,

    /// Opaque bearer token for subsequent requests
    pub token: String,

    /// Session expiry instant
    pub expires_at: DateTime<Utc>,

    /// Role-dependent post-login redirect
    pub redirect_path: String,
}

/// Response for the current-session lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponse {
    /// Indicates operation success
    pub success: bool,

    /// The session's user
    pub user: UserInfo,
}
