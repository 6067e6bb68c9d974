//! Port admin contact request and response types.

use chrono::{DateTime, Utc};
use entity::port_admin_contacts::ContactStatus;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a contact
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    /// The port this contact belongs to
    pub port_id: Uuid,

    /// Contact email; unique across all contacts
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Full contact name
    #[validate(length(min = 1, max = 255, message = "Contact name is required"))]
    pub contact_name: String,
}

/// Request body for updating a contact. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    #[validate(length(min = 1, max = 255, message = "Contact name must not be empty"))]
    pub contact_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email:        Option<String>,
}

/// Contact as returned by the API. Deliberately omits the verification
/// token fields so a pending token can never leak through a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub id:           Uuid,
    pub port_id:      Uuid,
    pub email:        String,
    pub contact_name: String,
    pub status:       ContactStatus,
    pub is_verified:  bool,
    pub user_id:      Option<Uuid>,
    pub created_at:   DateTime<Utc>,
}

impl From<&entity::port_admin_contacts::Model> for ContactInfo {
    fn from(contact: &entity::port_admin_contacts::Model) -> Self {
        Self {
            id:           contact.id,
            port_id:      contact.port_id,
            email:        contact.email.clone(),
            contact_name: contact.contact_name.clone(),
            status:       contact.status.clone(),
            is_verified:  contact.is_verified,
            user_id:      contact.user_id,
            created_at:   contact.created_at,
        }
    }
}
