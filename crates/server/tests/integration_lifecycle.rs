//! # Integration Tests for the Terminal Lifecycle
//!
//! Submission, activation with calendar-month date arithmetic, the
//! active-terminal field narrowing and role gating.

mod common;

use chrono::NaiveDate;
use common::{
    activation_log_count, create_admin, create_organization, create_port, create_user, setup_db,
    subscription_type_by_months,
};
use entity::terminals::TerminalStatus;
use entity::users::UserRole;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use server::lifecycle::{activate, set_status, submit, update_terminal, ActivationRequest, TerminalDraft, TerminalUpdate};
use server::middleware::auth::AuthenticatedUser;
use server::AppState;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(name: &str) -> TerminalDraft {
    TerminalDraft {
        terminal_name: name.to_string(),
        ..TerminalDraft::default()
    }
}

#[tokio::test]
async fn test_submit_defaults_to_processing_and_logs() {
    let db = setup_db().await;
    let org = create_organization(&db, "Harbor Group").await;
    let port = create_port(&db, org.id, "Port of Hamburg").await;

    let terminal = submit(&db, port.id, draft("North Quay"), None).await.unwrap();

    assert_eq!(terminal.status, TerminalStatus::Processing);
    assert!(terminal.activation_end_date.is_none());
    assert_eq!(activation_log_count(&db, terminal.id, "submitted").await, 1);
}

#[tokio::test]
async fn test_submit_notifies_system_admins() {
    let db = setup_db().await;
    let admin = create_admin(&db, "admin@portray.example", "AdminPass123").await;
    let org = create_organization(&db, "Harbor Group").await;
    let port = create_port(&db, org.id, "Port of Hamburg").await;

    submit(&db, port.id, draft("North Quay"), None).await.unwrap();

    let inbox = entity::notifications::Entity::find()
        .filter(entity::notifications::Column::UserId.eq(admin.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, "terminal_activation");
    assert!(!inbox[0].is_read);
}

#[tokio::test]
async fn test_end_to_end_activation_scenario() {
    let db = setup_db().await;
    let admin = create_admin(&db, "admin@portray.example", "AdminPass123").await;
    let org = create_organization(&db, "Harbor Group").await;
    let port = create_port(&db, org.id, "Port of Antwerp").await;
    assert!(port.is_active);

    let terminal = submit(&db, port.id, draft("East Terminal"), Some(admin.id)).await.unwrap();
    assert_eq!(terminal.status, TerminalStatus::Processing);

    let twelve_months = subscription_type_by_months(&db, 12).await;
    let activated = activate(
        &db,
        terminal.id,
        ActivationRequest {
            activation_start_date: date(2025, 1, 1),
            subscription_type_id:  twelve_months.id,
            work_order_no:         Some("WO-1001".to_string()),
            work_order_date:       Some(date(2024, 12, 20)),
        },
        Some(admin.id),
    )
    .await
    .unwrap();

    assert_eq!(activated.status, TerminalStatus::Active);
    assert_eq!(activated.activation_start_date, Some(date(2025, 1, 1)));
    assert_eq!(activated.activation_end_date, Some(date(2026, 1, 1)));
    assert_eq!(activated.work_order_no.as_deref(), Some("WO-1001"));
    assert_eq!(activation_log_count(&db, terminal.id, "activated").await, 1);
}

#[tokio::test]
async fn test_activation_clamps_month_end() {
    let db = setup_db().await;
    let org = create_organization(&db, "Harbor Group").await;
    let port = create_port(&db, org.id, "Port of Genoa").await;
    let terminal = submit(&db, port.id, draft("West Pier"), None).await.unwrap();

    let one_month = subscription_type_by_months(&db, 1).await;
    let activated = activate(
        &db,
        terminal.id,
        ActivationRequest {
            activation_start_date: date(2024, 1, 31),
            subscription_type_id:  one_month.id,
            work_order_no:         None,
            work_order_date:       None,
        },
        None,
    )
    .await
    .unwrap();

    // Calendar-month addition clamps to the leap day.
    assert_eq!(activated.activation_end_date, Some(date(2024, 2, 29)));
}

#[tokio::test]
async fn test_activation_rejects_unknown_subscription_type() {
    let db = setup_db().await;
    let org = create_organization(&db, "Harbor Group").await;
    let port = create_port(&db, org.id, "Port of Oslo").await;
    let terminal = submit(&db, port.id, draft("South Dock"), None).await.unwrap();

    let result = activate(
        &db,
        terminal.id,
        ActivationRequest {
            activation_start_date: date(2025, 1, 1),
            subscription_type_id:  9999,
            work_order_no:         None,
            work_order_date:       None,
        },
        None,
    )
    .await;

    assert!(result.is_err());
    let reloaded = entity::terminals::Entity::find_by_id(terminal.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, TerminalStatus::Processing);
}

#[tokio::test]
async fn test_activate_forbidden_for_non_admin() {
    let db = setup_db().await;
    let port_admin = create_user(&db, "padmin@port.example", "GoodPassword1", UserRole::PortAdmin, true).await;
    let org = create_organization(&db, "Harbor Group").await;
    let port = create_port(&db, org.id, "Port of Bergen").await;
    let terminal = submit(&db, port.id, draft("Cold Store"), None).await.unwrap();

    let twelve_months = subscription_type_by_months(&db, 12).await;
    let state = AppState::new(db.clone());
    let authenticated = AuthenticatedUser {
        id:    port_admin.id,
        email: port_admin.email.clone(),
        role:  port_admin.role.clone(),
    };

    let result = server::terminals::activate_terminal_inner(
        &state,
        authenticated,
        terminal.id,
        server::dto::terminals::ActivateTerminalRequest {
            activation_start_date: date(2025, 1, 1),
            subscription_type_id:  twelve_months.id,
            work_order_no:         None,
            work_order_date:       None,
        },
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.status(), axum::http::StatusCode::FORBIDDEN);

    let reloaded = entity::terminals::Entity::find_by_id(terminal.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, TerminalStatus::Processing, "Status must be unchanged");
}

#[tokio::test]
async fn test_active_terminal_update_is_narrowed() {
    let db = setup_db().await;
    let org = create_organization(&db, "Harbor Group").await;
    let port = create_port(&db, org.id, "Port of Valencia").await;
    let terminal = submit(&db, port.id, draft("Container Yard"), None).await.unwrap();

    let twelve_months = subscription_type_by_months(&db, 12).await;
    let activated = activate(
        &db,
        terminal.id,
        ActivationRequest {
            activation_start_date: date(2025, 1, 1),
            subscription_type_id:  twelve_months.id,
            work_order_no:         None,
            work_order_date:       None,
        },
        None,
    )
    .await
    .unwrap();

    let one_month = subscription_type_by_months(&db, 1).await;
    let updated = update_terminal(
        &db,
        terminal.id,
        TerminalUpdate {
            terminal_name: Some("Container Yard II".to_string()),
            subscription_type_id: Some(one_month.id),
            activation_start_date: Some(date(2030, 6, 1)),
            status: Some(TerminalStatus::Processing),
            ..TerminalUpdate::default()
        },
        None,
    )
    .await
    .unwrap();

    // Allow-listed field applied; subscription fields silently dropped.
    assert_eq!(updated.terminal_name, "Container Yard II");
    assert_eq!(updated.status, TerminalStatus::Active);
    assert_eq!(updated.subscription_type_id, activated.subscription_type_id);
    assert_eq!(updated.activation_start_date, activated.activation_start_date);
    assert_eq!(updated.activation_end_date, activated.activation_end_date);
    assert_eq!(activation_log_count(&db, terminal.id, "updated").await, 1);
}

#[tokio::test]
async fn test_pending_update_applies_all_fields_and_renotifies() {
    let db = setup_db().await;
    let admin = create_admin(&db, "admin@portray.example", "AdminPass123").await;
    let org = create_organization(&db, "Harbor Group").await;
    let port = create_port(&db, org.id, "Port of Gdansk").await;
    let terminal = submit(&db, port.id, draft("Bulk Terminal"), None).await.unwrap();

    let baseline = entity::notifications::Entity::find()
        .filter(entity::notifications::Column::UserId.eq(admin.id))
        .count(&db)
        .await
        .unwrap();

    let updated = update_terminal(
        &db,
        terminal.id,
        TerminalUpdate {
            terminal_name: Some("Bulk Terminal A".to_string()),
            status: Some(TerminalStatus::Processing),
            currency: Some("PLN".to_string()),
            ..TerminalUpdate::default()
        },
        None,
    )
    .await
    .unwrap();

    assert_eq!(updated.terminal_name, "Bulk Terminal A");
    assert_eq!(updated.currency.as_deref(), Some("PLN"));

    let after = entity::notifications::Entity::find()
        .filter(entity::notifications::Column::UserId.eq(admin.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(after, baseline + 1, "Re-submitting for processing notifies admins again");
}

#[tokio::test]
async fn test_set_status_overrides_and_logs() {
    let db = setup_db().await;
    let admin = create_admin(&db, "admin@portray.example", "AdminPass123").await;
    let org = create_organization(&db, "Harbor Group").await;
    let port = create_port(&db, org.id, "Port of Piraeus").await;
    let terminal = submit(&db, port.id, draft("Ferry Dock"), None).await.unwrap();

    let rejected = set_status(&db, terminal.id, TerminalStatus::Rejected, Some(admin.id))
        .await
        .unwrap();

    assert_eq!(rejected.status, TerminalStatus::Rejected);
    assert_eq!(activation_log_count(&db, terminal.id, "status_changed").await, 1);
}

#[tokio::test]
async fn test_invalid_status_string_rejected() {
    assert!("Decommissioned".parse::<TerminalStatus>().is_err());
    assert!("Active".parse::<TerminalStatus>().is_ok());
    assert!("Processing for activation".parse::<TerminalStatus>().is_ok());
    assert!("Rejected".parse::<TerminalStatus>().is_ok());
}
