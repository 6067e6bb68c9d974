//! Notification response types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Notification as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInfo {
    pub id:         Uuid,
    pub user_id:    Uuid,
    #[serde(rename = "type")]
    pub kind:       String,
    pub title:      String,
    pub message:    String,
    pub data:       Option<serde_json::Value>,
    pub is_read:    bool,
    pub created_at: DateTime<Utc>,
}

impl From<&entity::notifications::Model> for NotificationInfo {
    fn from(notification: &entity::notifications::Model) -> Self {
        Self {
            id:         notification.id,
            user_id:    notification.user_id,
            kind:       notification.kind.clone(),
            title:      notification.title.clone(),
            message:    notification.message.clone(),
            data:       notification.data.clone(),
            is_read:    notification.is_read,
            created_at: notification.created_at,
        }
    }
}
