//! Users Entity
//!
//! Represents system users with authentication and profile information.
//! Users are created explicitly by an admin, or provisioned implicitly when
//! a port admin contact is first verified (inactive until password setup).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:            Uuid,
    #[sea_orm(unique)]
    pub email:         String,
    pub password_hash: String,
    pub first_name:    Option<String>,
    pub last_name:     Option<String>,
    pub role:          UserRole,
    pub is_active:     bool,
    /// Port this user administers (PortAdmin accounts only).
    pub port_id:       Option<Uuid>,
    /// Terminal ids this user is scoped to, stored as a JSON array.
    pub terminal_ids:  Option<Json>,
    pub last_login:    Option<chrono::DateTime<chrono::Utc>>,
    pub created_at:    chrono::DateTime<chrono::Utc>,
    pub updated_at:    chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef { Relation::Sessions.def() }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef { Relation::Notifications.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// User role enumeration
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum UserRole {
    /// Full administrative access, including terminal activation
    #[sea_orm(string_value = "SystemAdmin")]
    SystemAdmin,
    /// Administers a single port and its terminals
    #[sea_orm(string_value = "PortAdmin")]
    PortAdmin,
    /// Regular read-mostly user
    #[sea_orm(string_value = "user")]
    #[serde(rename = "user")]
    User,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::SystemAdmin => write!(f, "SystemAdmin"),
            UserRole::PortAdmin => write!(f, "PortAdmin"),
            UserRole::User => write!(f, "user"),
        }
    }
}
