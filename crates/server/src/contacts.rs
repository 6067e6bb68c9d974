//! # Port Admin Contact Handlers
//!
//! Contact CRUD plus the verification entry points. Creating a contact
//! issues a verification token and sends the verification email;
//! delivery is best-effort and never fails the create.

use axum::Json;
use chrono::Utc;
use entity::port_admin_contacts::ContactStatus;
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::contacts::{ContactInfo, CreateContactRequest, UpdateContactRequest};
use crate::dto::DataResponse;
use crate::{mailer, verification, AppState};

/// Lists all contacts, newest first.
pub async fn list_contacts_inner(state: &AppState) -> Result<Json<DataResponse<Vec<ContactInfo>>>> {
    let rows = entity::port_admin_contacts::Entity::find()
        .order_by_desc(entity::port_admin_contacts::Column::CreatedAt)
        .all(&state.db)
        .await?;
    let contacts = rows.iter().map(ContactInfo::from).collect();
    Ok(Json(DataResponse::ok(contacts)))
}

/// Creates a contact and kicks off email verification.
///
/// # Errors
///
/// Duplicate contact emails are rejected with a conflict error.
pub async fn create_contact_inner(
    state: &AppState,
    req: CreateContactRequest,
) -> Result<Json<DataResponse<ContactInfo>>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    entity::ports::Entity::find_by_id(req.port_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::validation("Port does not exist"))?;

    let duplicate = entity::port_admin_contacts::Entity::find()
        .filter(entity::port_admin_contacts::Column::Email.eq(req.email.as_str()))
        .one(&state.db)
        .await?;
    if duplicate.is_some() {
        return Err(AppError::conflict("A contact with this email already exists"));
    }

    let now = Utc::now();
    let contact = entity::port_admin_contacts::ActiveModel {
        id: Set(Uuid::new_v4()),
        port_id: Set(req.port_id),
        email: Set(req.email),
        contact_name: Set(req.contact_name),
        status: Set(ContactStatus::Inactive),
        is_verified: Set(false),
        verification_token: Set(None),
        verification_token_expires: Set(None),
        user_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let contact = contact.insert(&state.db).await?;

    info!(contact_id = %contact.id, "Contact created");

    let (contact, token) = verification::issue_verification(&state.db, contact.id).await?;
    let (subject, body) = mailer::verification_email(&contact.contact_name, &token);
    mailer::send_best_effort(state.mailer.as_ref(), &contact.email, &subject, &body).await;

    Ok(Json(DataResponse::ok(ContactInfo::from(&contact))))
}

/// Updates a contact's name or email. Absent fields are left alone.
pub async fn update_contact_inner(
    state: &AppState,
    id: Uuid,
    req: UpdateContactRequest,
) -> Result<Json<DataResponse<ContactInfo>>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    let contact = entity::port_admin_contacts::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Contact not found"))?;

    if let Some(new_email) = &req.email {
        let taken = entity::port_admin_contacts::Entity::find()
            .filter(entity::port_admin_contacts::Column::Email.eq(new_email.as_str()))
            .filter(entity::port_admin_contacts::Column::Id.ne(id))
            .one(&state.db)
            .await?;
        if taken.is_some() {
            return Err(AppError::conflict("A contact with this email already exists"));
        }
    }

    let mut active: entity::port_admin_contacts::ActiveModel = contact.into();
    if let Some(v) = req.contact_name {
        active.contact_name = Set(v);
    }
    if let Some(v) = req.email {
        active.email = Set(v);
    }
    active.updated_at = Set(Utc::now());
    let contact = active.update(&state.db).await?;

    Ok(Json(DataResponse::ok(ContactInfo::from(&contact))))
}

/// Re-issues the verification token and resends the email. Rejected once
/// the contact is verified.
pub async fn resend_verification_inner(state: &AppState, id: Uuid) -> Result<Json<DataResponse<ContactInfo>>> {
    let (contact, token) = verification::issue_verification(&state.db, id).await?;
    let (subject, body) = mailer::verification_email(&contact.contact_name, &token);
    mailer::send_best_effort(state.mailer.as_ref(), &contact.email, &subject, &body).await;

    Ok(Json(DataResponse::ok(ContactInfo::from(&contact))))
}

/// Consumes a verification token from the emailed link.
pub async fn verify_contact_inner(state: &AppState, token: &str) -> Result<Json<DataResponse<ContactInfo>>> {
    let contact = verification::consume_verification(&state.db, token).await?;
    Ok(Json(DataResponse::ok(ContactInfo::from(&contact))))
}

/// Flips a contact between active and inactive.
pub async fn toggle_contact_status_inner(state: &AppState, id: Uuid) -> Result<Json<DataResponse<ContactInfo>>> {
    let contact = entity::port_admin_contacts::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Contact not found"))?;

    let flipped = match contact.status {
        ContactStatus::Active => ContactStatus::Inactive,
        ContactStatus::Inactive => ContactStatus::Active,
    };

    let mut active: entity::port_admin_contacts::ActiveModel = contact.into();
    active.status = Set(flipped);
    active.updated_at = Set(Utc::now());
    let contact = active.update(&state.db).await?;

    Ok(Json(DataResponse::ok(ContactInfo::from(&contact))))
}
