//! # Contact Verification Flow
//!
//! State machine per port admin contact:
//!
//! ```text
//! [created, is_verified=false] --issue token--> [token pending, expiry set]
//! [token pending] --consume valid token--> [is_verified=true, status=active, token cleared]
//! [token pending] --token expired--> [remains pending; re-issue required]
//! ```
//!
//! Consuming a token also provisions (or links) the user account for the
//! contact's email. The consume path runs inside a transaction so the
//! token check and the multi-entity writes are atomic.

use chrono::{Duration, Utc};
use entity::port_admin_contacts::{Column, ContactStatus, Entity as ContactsEntity};
use entity::users::{Column as UserColumn, Entity as UsersEntity, UserRole};
use error::{AppError, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, EntityTrait, QueryFilter, Set, TransactionError,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::audit;

/// Verification tokens are valid for 24 hours.
pub const VERIFICATION_TTL_HOURS: i64 = 24;

/// Sentinel stored for provisioned accounts before password setup. Not a
/// valid PHC string, so it can never verify.
pub const PLACEHOLDER_PASSWORD_HASH: &str = "*pending-password-setup*";

/// Issues a fresh verification token for a contact.
///
/// Overwrites any previous pending token; only one token is valid at a
/// time. Re-issuing for an already-verified contact is rejected.
///
/// # Returns
///
/// The updated contact and the raw token to embed in the email.
pub async fn issue_verification(db: &DbConn, contact_id: Uuid) -> Result<(entity::port_admin_contacts::Model, String)> {
    let contact = ContactsEntity::find_by_id(contact_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Contact not found"))?;

    if contact.is_verified {
        return Err(AppError::conflict("Contact email is already verified"));
    }

    let token = ::auth::generate_token();
    let expires = Utc::now() + Duration::hours(VERIFICATION_TTL_HOURS);

    let mut active: entity::port_admin_contacts::ActiveModel = contact.into();
    active.verification_token = Set(Some(token.clone()));
    active.verification_token_expires = Set(Some(expires));
    active.updated_at = Set(Utc::now());
    let contact = active.update(db).await?;

    info!(contact_id = %contact.id, "Verification token issued");

    Ok((contact, token))
}

/// Consumes a verification token.
///
/// Atomically checks token match and non-expiry; on success flips
/// `is_verified`, activates the contact, clears the token fields and
/// provisions or links the user account. A consumed or expired token can
/// never verify twice.
pub async fn consume_verification(db: &DbConn, token: &str) -> Result<entity::port_admin_contacts::Model> {
    let token = token.to_string();

    let contact = db
        .transaction::<_, entity::port_admin_contacts::Model, AppError>(move |txn| {
            Box::pin(async move {
                let invalid = || AppError::validation("Invalid or expired verification token");

                let contact = ContactsEntity::find()
                    .filter(Column::VerificationToken.eq(token.as_str()))
                    .one(txn)
                    .await?
                    .ok_or_else(invalid)?;

                if contact.is_verified {
                    return Err(invalid());
                }

                match contact.verification_token_expires {
                    Some(expires) if expires > Utc::now() => {},
                    _ => return Err(invalid()),
                }

                let user_id = provision_or_link_user(txn, &contact).await?;

                let contact_id = contact.id;
                let mut active: entity::port_admin_contacts::ActiveModel = contact.into();
                active.is_verified = Set(true);
                active.status = Set(ContactStatus::Active);
                active.verification_token = Set(None);
                active.verification_token_expires = Set(None);
                active.user_id = Set(Some(user_id));
                active.updated_at = Set(Utc::now());
                let contact = active.update(txn).await?;

                audit::log_account_event(
                    txn,
                    Some(user_id),
                    "verified",
                    format!("Contact email '{}' verified", contact.email),
                    None,
                    None,
                )
                .await;

                info!(contact_id = %contact_id, user_id = %user_id, "Contact verified");

                Ok(contact)
            })
        })
        .await
        .map_err(|e| {
            match e {
                TransactionError::Connection(err) => AppError::from(err),
                TransactionError::Transaction(err) => err,
            }
        })?;

    Ok(contact)
}

/// Provisions a user for a newly verified contact, or links and refreshes
/// an existing one.
///
/// A fresh account gets the placeholder hash and stays inactive until
/// password setup completes. When a user already exists for the contact's
/// email, its profile fields are refreshed from the contact record as an
/// explicit merge: the overwrite is described in an audit entry rather
/// than applied silently.
async fn provision_or_link_user<C: ConnectionTrait>(
    db: &C,
    contact: &entity::port_admin_contacts::Model,
) -> Result<Uuid> {
    let (first_name, last_name) = split_contact_name(&contact.contact_name);
    let existing = UsersEntity::find()
        .filter(UserColumn::Email.eq(contact.email.as_str()))
        .one(db)
        .await?;

    if let Some(user) = existing {
        let user_id = user.id;
        let old = audit::UserSnapshot::of(&user);

        let mut active: entity::users::ActiveModel = user.into();
        active.first_name = Set(first_name);
        active.last_name = Set(last_name);
        active.role = Set(UserRole::PortAdmin);
        active.port_id = Set(Some(contact.port_id));
        active.updated_at = Set(Utc::now());
        let user = active.update(db).await?;

        audit::log_user_update(db, user_id, &old, &audit::UserSnapshot::of(&user), None).await;

        return Ok(user_id);
    }

    let now = Utc::now();
    let user = entity::users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(contact.email.clone()),
        password_hash: Set(PLACEHOLDER_PASSWORD_HASH.to_string()),
        first_name: Set(first_name),
        last_name: Set(last_name),
        role: Set(UserRole::PortAdmin),
        is_active: Set(false),
        port_id: Set(Some(contact.port_id)),
        terminal_ids: Set(None),
        last_login: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let user = user.insert(db).await?;

    audit::log_account_event(
        db,
        Some(user.id),
        "created",
        format!("Account provisioned for verified contact '{}'", contact.email),
        None,
        None,
    )
    .await;

    Ok(user.id)
}

/// Splits a free-form contact name into first/last on the first space.
fn split_contact_name(full: &str) -> (Option<String>, Option<String>) {
    let trimmed = full.trim();
    if trimmed.is_empty() {
        return (None, None);
    }

    match trimmed.split_once(' ') {
        Some((first, last)) => (Some(first.to_string()), Some(last.trim().to_string())),
        None => (Some(trimmed.to_string()), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_contact_name() {
        assert_eq!(
            split_contact_name("Ada Marlow"),
            (Some("Ada".to_string()), Some("Marlow".to_string()))
        );
        assert_eq!(split_contact_name("Ada"), (Some("Ada".to_string()), None));
        assert_eq!(split_contact_name("  "), (None, None));
        assert_eq!(
            split_contact_name("Ada  de  Marlow"),
            (Some("Ada".to_string()), Some("de  Marlow".to_string()))
        );
    }

    #[test]
    fn test_placeholder_hash_never_verifies() {
        let password = ::auth::secrecy::SecretString::from("Anything123".to_string());
        assert!(::auth::verify_password(&password, PLACEHOLDER_PASSWORD_HASH).is_err());
    }
}
