//! Seed data for PortRay
//!
//! Two seed steps run after migrations:
//!
//! - the subscription-type lookup (1/12/24/48 month plans), inserted once
//!   when the table is empty;
//! - the initial SystemAdmin account, provisioned from
//!   `PORTRAY_ADMIN_EMAIL` / `PORTRAY_ADMIN_PASSWORD` when the users table
//!   is empty. This replaces any notion of a hard-coded superuser: there is
//!   no credential bypass in the login path, only this explicit one-time
//!   provisioning step.

use auth::secrecy::{ExposeSecret, SecretString};
use chrono::Utc;
use entity::users::UserRole;
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, DbConn, EntityTrait, PaginatorTrait, Set};
use tracing::{info, warn};
use uuid::Uuid;

/// Subscription plans offered at activation time.
const SUBSCRIPTION_PLANS: &[(&str, i32)] = &[
    ("1 Month", 1),
    ("12 Months", 12),
    ("24 Months", 24),
    ("48 Months", 48),
];

/// Run all seed steps. Idempotent: each step only writes when its target
/// table is empty.
pub async fn run_all_seeds(db: &DbConn) -> Result<()> {
    seed_subscription_types(db).await?;
    seed_admin_user(db).await?;
    Ok(())
}

/// Insert the fixed subscription-type lookup if it is empty.
pub async fn seed_subscription_types(db: &DbConn) -> Result<()> {
    let count = entity::SubscriptionTypes::find().count(db).await?;
    if count > 0 {
        return Ok(());
    }

    info!("Seeding subscription types...");

    for (name, months) in SUBSCRIPTION_PLANS {
        let plan = entity::subscription_types::ActiveModel {
            name: Set((*name).to_string()),
            months: Set(*months),
            ..Default::default()
        };
        plan.insert(db)
            .await
            .map_err(|e| AppError::database(format!("Failed to seed subscription type {}: {}", name, e)))?;
    }

    info!("Subscription types seeded successfully");
    Ok(())
}

/// Provision the initial SystemAdmin account from the environment.
///
/// Skipped with a warning when the users table already has rows or when the
/// `PORTRAY_ADMIN_*` variables are not set. Setting only one of the two
/// variables is a configuration error.
pub async fn seed_admin_user(db: &DbConn) -> Result<()> {
    let count = entity::Users::find().count(db).await?;
    if count > 0 {
        return Ok(());
    }

    let email = std::env::var("PORTRAY_ADMIN_EMAIL").ok();
    let password = std::env::var("PORTRAY_ADMIN_PASSWORD").ok();

    let (email, password) = match (email, password) {
        (Some(e), Some(p)) => (e, p),
        (None, None) => {
            warn!("No users exist and PORTRAY_ADMIN_EMAIL/PORTRAY_ADMIN_PASSWORD are unset; skipping admin seed");
            return Ok(());
        },
        _ => {
            return Err(AppError::config(
                "PORTRAY_ADMIN_EMAIL and PORTRAY_ADMIN_PASSWORD must be set together",
            ));
        },
    };

    auth::validate_password_strength(&password).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        AppError::config(format!("Admin password rejected: {}", messages.join(", ")))
    })?;

    let secret = SecretString::from(password);
    let password_hash = auth::hash_password(&secret)
        .map_err(|e| AppError::internal(format!("Failed to hash admin password: {}", e)))?;

    let now = Utc::now();
    let admin = entity::users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.clone()),
        password_hash: Set(password_hash.expose_secret().to_string()),
        first_name: Set(Some("System".to_string())),
        last_name: Set(Some("Admin".to_string())),
        role: Set(UserRole::SystemAdmin),
        is_active: Set(true),
        port_id: Set(None),
        terminal_ids: Set(None),
        last_login: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    admin
        .insert(db)
        .await
        .map_err(|e| AppError::database(format!("Failed to seed admin user: {}", e)))?;

    info!(email = %email, "Initial SystemAdmin account provisioned");
    Ok(())
}
