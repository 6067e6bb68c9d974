//! # Audit Log
//!
//! Append-only writers for terminal lifecycle events (`activation_logs`)
//! and account lifecycle events (`audit_logs`). Audit writes are
//! deliberately non-blocking: failures are logged and swallowed so the
//! primary operation they describe always succeeds or fails on its own
//! merits.

use chrono::Utc;
use entity::users::UserRole;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use tracing::warn;
use uuid::Uuid;

/// Records a terminal lifecycle event. Best-effort; never fails the caller.
pub async fn log_terminal_event<C: ConnectionTrait>(
    db: &C,
    terminal_id: Uuid,
    action: &str,
    description: String,
    performed_by: Option<Uuid>,
    data: Option<serde_json::Value>,
) {
    let entry = entity::activation_logs::ActiveModel {
        id: Set(Uuid::new_v4()),
        terminal_id: Set(terminal_id),
        action: Set(action.to_string()),
        description: Set(description),
        performed_by: Set(performed_by),
        data: Set(data),
        created_at: Set(Utc::now()),
    };

    if let Err(e) = entry.insert(db).await {
        warn!(terminal_id = %terminal_id, action, "Failed to write activation log: {}", e);
    }
}

/// Records an account lifecycle event. Best-effort; never fails the caller.
pub async fn log_account_event<C: ConnectionTrait>(
    db: &C,
    user_id: Option<Uuid>,
    action: &str,
    description: String,
    performed_by: Option<Uuid>,
    data: Option<serde_json::Value>,
) {
    let entry = entity::audit_logs::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        action: Set(action.to_string()),
        description: Set(description),
        performed_by: Set(performed_by),
        data: Set(data),
        created_at: Set(Utc::now()),
    };

    if let Err(e) = entry.insert(db).await {
        warn!(user_id = ?user_id, action, "Failed to write audit log: {}", e);
    }
}

/// The fixed set of user fields tracked by [`log_user_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSnapshot {
    pub email:        String,
    pub first_name:   Option<String>,
    pub last_name:    Option<String>,
    pub role:         UserRole,
    pub port_id:      Option<Uuid>,
    pub terminal_ids: Option<serde_json::Value>,
}

impl UserSnapshot {
    /// Captures the tracked fields of a user model.
    #[must_use]
    pub fn of(user: &entity::users::Model) -> Self {
        Self {
            email:        user.email.clone(),
            first_name:   user.first_name.clone(),
            last_name:    user.last_name.clone(),
            role:         user.role.clone(),
            port_id:      user.port_id,
            terminal_ids: user.terminal_ids.clone(),
        }
    }
}

/// Builds a human-readable description of the fields that changed between
/// two snapshots, or `None` when no tracked field changed.
#[must_use]
pub fn describe_user_changes(old: &UserSnapshot, new: &UserSnapshot) -> Option<String> {
    fn fmt_opt(value: &Option<String>) -> String {
        value.clone().unwrap_or_else(|| "(none)".to_string())
    }

    let mut changes = Vec::new();

    if old.email != new.email {
        changes.push(format!("email changed from '{}' to '{}'", old.email, new.email));
    }
    if old.first_name != new.first_name {
        changes.push(format!(
            "first name changed from '{}' to '{}'",
            fmt_opt(&old.first_name),
            fmt_opt(&new.first_name)
        ));
    }
    if old.last_name != new.last_name {
        changes.push(format!(
            "last name changed from '{}' to '{}'",
            fmt_opt(&old.last_name),
            fmt_opt(&new.last_name)
        ));
    }
    if old.role != new.role {
        changes.push(format!("role changed from '{}' to '{}'", old.role, new.role));
    }
    if old.port_id != new.port_id {
        changes.push("port assignment changed".to_string());
    }
    if old.terminal_ids != new.terminal_ids {
        changes.push("terminal assignments changed".to_string());
    }

    if changes.is_empty() {
        None
    }
    else {
        Some(changes.join(", "))
    }
}

/// Writes an `updated` audit entry describing a user update, if and only if
/// at least one tracked field actually changed. Best-effort.
pub async fn log_user_update<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    old: &UserSnapshot,
    new: &UserSnapshot,
    performed_by: Option<Uuid>,
) {
    let Some(description) = describe_user_changes(old, new) else {
        return;
    };

    log_account_event(db, Some(user_id), "updated", description, performed_by, None).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> UserSnapshot {
        UserSnapshot {
            email:        "contact@port.example".to_string(),
            first_name:   Some("Ada".to_string()),
            last_name:    Some("Marlow".to_string()),
            role:         UserRole::PortAdmin,
            port_id:      None,
            terminal_ids: None,
        }
    }

    #[test]
    fn test_no_changes_yields_none() {
        let old = snapshot();
        let new = snapshot();
        assert_eq!(describe_user_changes(&old, &new), None);
    }

    #[test]
    fn test_single_change_described() {
        let old = snapshot();
        let mut new = snapshot();
        new.email = "new@port.example".to_string();

        let description = describe_user_changes(&old, &new).unwrap();
        assert_eq!(
            description,
            "email changed from 'contact@port.example' to 'new@port.example'"
        );
    }

    #[test]
    fn test_multiple_changes_comma_joined() {
        let old = snapshot();
        let mut new = snapshot();
        new.first_name = Some("Grace".to_string());
        new.role = UserRole::SystemAdmin;

        let description = describe_user_changes(&old, &new).unwrap();
        assert!(description.contains("first name changed from 'Ada' to 'Grace'"));
        assert!(description.contains("role changed from 'PortAdmin' to 'SystemAdmin'"));
        assert!(description.contains(", "));
    }

    #[test]
    fn test_cleared_field_rendered_as_none() {
        let old = snapshot();
        let mut new = snapshot();
        new.last_name = None;

        let description = describe_user_changes(&old, &new).unwrap();
        assert!(description.contains("last name changed from 'Marlow' to '(none)'"));
    }

    #[test]
    fn test_terminal_ids_diffed_as_json() {
        let old = snapshot();
        let mut new = snapshot();
        new.terminal_ids = Some(serde_json::json!(["t1", "t2"]));

        let description = describe_user_changes(&old, &new).unwrap();
        assert!(description.contains("terminal assignments changed"));
    }
}
