//! Port request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a port
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortRequest {
    /// Port name
    #[validate(length(min = 1, max = 255, message = "Port name is required"))]
    pub port_name: String,

    /// Display name shown in the UI
    pub display_name: Option<String>,

    /// Owning organization
    pub organization_id: Uuid,

    /// Country
    pub country: Option<String>,

    /// State or province
    pub state: Option<String>,
}

/// Request body for updating a port. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortRequest {
    #[validate(length(min = 1, max = 255, message = "Port name must not be empty"))]
    pub port_name:    Option<String>,
    pub display_name: Option<String>,
    pub country:      Option<String>,
    pub state:        Option<String>,
}

/// Port as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortInfo {
    pub id:              Uuid,
    pub port_name:       String,
    pub display_name:    Option<String>,
    pub organization_id: Uuid,
    pub country:         Option<String>,
    pub state:           Option<String>,
    pub is_active:       bool,
    pub created_at:      DateTime<Utc>,
    pub updated_at:      DateTime<Utc>,
}

impl From<&entity::ports::Model> for PortInfo {
    fn from(port: &entity::ports::Model) -> Self {
        Self {
            id:              port.id,
            port_name:       port.port_name.clone(),
            display_name:    port.display_name.clone(),
            organization_id: port.organization_id,
            country:         port.country.clone(),
            state:           port.state.clone(),
            is_active:       port.is_active,
            created_at:      port.created_at,
            updated_at:      port.updated_at,
        }
    }
}
