//! # Common Test Utilities
//!
//! Shared fixtures for integration tests: an in-memory SQLite database
//! with the full schema applied, plus builders for the domain records the
//! tests exercise.

use std::sync::Once;

use ::auth::secrecy::{ExposeSecret, SecretString};
use chrono::Utc;
use entity::users::UserRole;
use migration::{Migrator, MigratorTrait as _};
use sea_orm::{ActiveModelTrait, ColumnTrait, Database, DbConn, EntityTrait, QueryFilter, Set};
use server::AppState;
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize test logging (run once per test session)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Fresh in-memory database with migrations and the subscription-type
/// seed applied.
pub async fn setup_db() -> DbConn {
    init_test_env();

    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Migrations failed");
    migration::seeds::seed_subscription_types(&db)
        .await
        .expect("Subscription seed failed");
    db
}

/// Application state over a fresh test database.
pub async fn setup_state() -> AppState {
    AppState::new(setup_db().await)
}

/// Inserts a user with a real Argon2 hash so login flows work.
pub async fn create_user(
    db: &DbConn,
    email: &str,
    password: &str,
    role: UserRole,
    is_active: bool,
) -> entity::users::Model {
    let secret = SecretString::from(password.to_string());
    let hash = ::auth::hash_password(&secret).expect("Hashing failed");

    let now = Utc::now();
    entity::users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(hash.expose_secret().to_string()),
        first_name: Set(Some("Test".to_string())),
        last_name: Set(Some("User".to_string())),
        role: Set(role),
        is_active: Set(is_active),
        port_id: Set(None),
        terminal_ids: Set(None),
        last_login: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert user")
}

/// Inserts an active SystemAdmin with the given credentials.
pub async fn create_admin(db: &DbConn, email: &str, password: &str) -> entity::users::Model {
    create_user(db, email, password, UserRole::SystemAdmin, true).await
}

pub async fn create_organization(db: &DbConn, name: &str) -> entity::organizations::Model {
    let now = Utc::now();
    entity::organizations::ActiveModel {
        id: Set(Uuid::new_v4()),
        organization_name: Set(name.to_string()),
        display_name: Set(None),
        organization_code: Set(None),
        country: Set(None),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert organization")
}

pub async fn create_port(db: &DbConn, organization_id: Uuid, name: &str) -> entity::ports::Model {
    let now = Utc::now();
    entity::ports::ActiveModel {
        id: Set(Uuid::new_v4()),
        port_name: Set(name.to_string()),
        display_name: Set(None),
        organization_id: Set(organization_id),
        country: Set(None),
        state: Set(None),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert port")
}

/// Inserts an unverified contact with no pending token.
pub async fn create_contact(db: &DbConn, port_id: Uuid, email: &str, name: &str) -> entity::port_admin_contacts::Model {
    let now = Utc::now();
    entity::port_admin_contacts::ActiveModel {
        id: Set(Uuid::new_v4()),
        port_id: Set(port_id),
        email: Set(email.to_string()),
        contact_name: Set(name.to_string()),
        status: Set(entity::port_admin_contacts::ContactStatus::Inactive),
        is_verified: Set(false),
        verification_token: Set(None),
        verification_token_expires: Set(None),
        user_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert contact")
}

/// Looks up a seeded subscription type by its month count.
pub async fn subscription_type_by_months(db: &DbConn, months: i32) -> entity::subscription_types::Model {
    entity::subscription_types::Entity::find()
        .filter(entity::subscription_types::Column::Months.eq(months))
        .one(db)
        .await
        .expect("Subscription lookup failed")
        .expect("Subscription type not seeded")
}

/// Counts a terminal's activation log entries with the given action.
pub async fn activation_log_count(db: &DbConn, terminal_id: Uuid, action: &str) -> u64 {
    use sea_orm::PaginatorTrait;

    entity::activation_logs::Entity::find()
        .filter(entity::activation_logs::Column::TerminalId.eq(terminal_id))
        .filter(entity::activation_logs::Column::Action.eq(action))
        .count(db)
        .await
        .expect("Activation log count failed")
}
