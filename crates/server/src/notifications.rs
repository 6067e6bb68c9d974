//! # Notification Handlers
//!
//! Per-user inbox endpoints over the [`crate::notify`] side-channel.

use axum::Json;
use error::{AppError, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::dto::notifications::NotificationInfo;
use crate::dto::{DataResponse, SuccessResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::{notify, AppState};

/// Unread counter payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnreadCount {
    pub count: u64,
}

/// Lists the caller's notifications, newest first.
pub async fn list_notifications_inner(
    state: &AppState,
    authenticated: AuthenticatedUser,
) -> Result<Json<DataResponse<Vec<NotificationInfo>>>> {
    let rows = notify::list_notifications(&state.db, authenticated.id).await?;
    Ok(Json(DataResponse::ok(rows.iter().map(NotificationInfo::from).collect())))
}

/// Counts the caller's unread notifications.
pub async fn unread_count_inner(
    state: &AppState,
    authenticated: AuthenticatedUser,
) -> Result<Json<DataResponse<UnreadCount>>> {
    let count = notify::unread_count(&state.db, authenticated.id).await?;
    Ok(Json(DataResponse::ok(UnreadCount { count })))
}

/// Marks one of the caller's notifications as read.
pub async fn mark_read_inner(
    state: &AppState,
    authenticated: AuthenticatedUser,
    id: Uuid,
) -> Result<Json<SuccessResponse>> {
    let affected = notify::mark_read(&state.db, authenticated.id, id).await?;
    if affected == 0 {
        return Err(AppError::not_found("Notification not found"));
    }
    Ok(Json(SuccessResponse::new("Notification marked as read")))
}

/// Marks all of the caller's notifications as read.
pub async fn mark_all_read_inner(state: &AppState, authenticated: AuthenticatedUser) -> Result<Json<SuccessResponse>> {
    notify::mark_all_read(&state.db, authenticated.id).await?;
    Ok(Json(SuccessResponse::new("All notifications marked as read")))
}

/// Deletes one of the caller's notifications.
pub async fn delete_notification_inner(
    state: &AppState,
    authenticated: AuthenticatedUser,
    id: Uuid,
) -> Result<Json<SuccessResponse>> {
    let affected = notify::delete_notification(&state.db, authenticated.id, id).await?;
    if affected == 0 {
        return Err(AppError::not_found("Notification not found"));
    }
    Ok(Json(SuccessResponse::new("Notification deleted")))
}
