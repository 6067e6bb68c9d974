//! # Notification Side-Channel
//!
//! Best-effort fan-out of admin-facing alerts plus the per-user inbox
//! queries. Notification writes never roll back or fail the state change
//! that triggered them.

use chrono::Utc;
use entity::notifications::{Column, Entity as NotificationsEntity};
use entity::users::{Column as UserColumn, Entity as UsersEntity, UserRole};
use error::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use tracing::warn;
use uuid::Uuid;

/// Appends a notification for one user. Fire-and-forget: failures are
/// logged and dropped.
pub async fn notify(
    db: &DbConn,
    user_id: Uuid,
    kind: &str,
    title: &str,
    message: &str,
    data: Option<serde_json::Value>,
) {
    let entry = entity::notifications::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        kind: Set(kind.to_string()),
        title: Set(title.to_string()),
        message: Set(message.to_string()),
        data: Set(data),
        is_read: Set(false),
        created_at: Set(Utc::now()),
    };

    if let Err(e) = entry.insert(db).await {
        warn!(user_id = %user_id, kind, "Failed to write notification: {}", e);
    }
}

/// Fans a notification out to every SystemAdmin inbox. Best-effort: a
/// failed lookup or write is logged and the triggering operation proceeds.
pub async fn notify_system_admins(
    db: &DbConn,
    kind: &str,
    title: &str,
    message: &str,
    data: Option<serde_json::Value>,
) {
    let admins = match UsersEntity::find()
        .filter(UserColumn::Role.eq(UserRole::SystemAdmin))
        .all(db)
        .await
    {
        Ok(admins) => admins,
        Err(e) => {
            warn!(kind, "Failed to look up admins for notification fan-out: {}", e);
            return;
        },
    };

    for admin in admins {
        notify(db, admin.id, kind, title, message, data.clone()).await;
    }
}

/// Lists a user's notifications, newest first.
pub async fn list_notifications(db: &DbConn, user_id: Uuid) -> Result<Vec<entity::notifications::Model>> {
    let rows = NotificationsEntity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

/// Counts a user's unread notifications.
pub async fn unread_count(db: &DbConn, user_id: Uuid) -> Result<u64> {
    let count = NotificationsEntity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::IsRead.eq(false))
        .count(db)
        .await?;
    Ok(count)
}

/// Marks one notification as read. Scoped to the owning user; marking a
/// notification that is not yours is a no-op.
pub async fn mark_read(db: &DbConn, user_id: Uuid, notification_id: Uuid) -> Result<u64> {
    let result = NotificationsEntity::update_many()
        .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
        .filter(Column::Id.eq(notification_id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Marks all of a user's notifications as read.
pub async fn mark_all_read(db: &DbConn, user_id: Uuid) -> Result<u64> {
    let result = NotificationsEntity::update_many()
        .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
        .filter(Column::UserId.eq(user_id))
        .filter(Column::IsRead.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes one notification, scoped to the owning user.
pub async fn delete_notification(db: &DbConn, user_id: Uuid, notification_id: Uuid) -> Result<u64> {
    let result = NotificationsEntity::delete_many()
        .filter(Column::Id.eq(notification_id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
