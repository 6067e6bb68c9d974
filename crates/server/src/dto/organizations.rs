//! Organization request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for creating an organization
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    /// Legal organization name
    #[validate(length(min = 1, max = 255, message = "Organization name is required"))]
    pub organization_name: String,

    /// Display name shown in the UI
    pub display_name: Option<String>,

    /// Short organization code
    #[validate(length(max = 32, message = "Organization code must be at most 32 characters"))]
    pub organization_code: Option<String>,

    /// ISO country name or code
    pub country: Option<String>,
}

/// Request body for updating an organization. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationRequest {
    #[validate(length(min = 1, max = 255, message = "Organization name must not be empty"))]
    pub organization_name: Option<String>,
    pub display_name:      Option<String>,
    #[validate(length(max = 32, message = "Organization code must be at most 32 characters"))]
    pub organization_code: Option<String>,
    pub country:           Option<String>,
    pub is_active:         Option<bool>,
}

/// Organization as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInfo {
    pub id:                Uuid,
    pub organization_name: String,
    pub display_name:      Option<String>,
    pub organization_code: Option<String>,
    pub country:           Option<String>,
    pub is_active:         bool,
    pub created_at:        DateTime<Utc>,
    pub updated_at:        DateTime<Utc>,
}

impl From<&entity::organizations::Model> for OrganizationInfo {
    fn from(org: &entity::organizations::Model) -> Self {
        Self {
            id:                org.id,
            organization_name: org.organization_name.clone(),
            display_name:      org.display_name.clone(),
            organization_code: org.organization_code.clone(),
            country:           org.country.clone(),
            is_active:         org.is_active,
            created_at:        org.created_at,
            updated_at:        org.updated_at,
        }
    }
}
