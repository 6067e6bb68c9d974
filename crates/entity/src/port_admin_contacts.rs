//! Port Admin Contacts Entity
//!
//! A human point of contact for a port, distinct from a user account but
//! linked one-to-one with a user once verified. Verification tokens are
//! stored inline; only one token is valid at a time and a consumed or
//! expired token can never verify twice.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "port_admin_contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                         Uuid,
    pub port_id:                    Uuid,
    #[sea_orm(unique)]
    pub email:                      String,
    pub contact_name:               String,
    pub status:                     ContactStatus,
    pub is_verified:                bool,
    pub verification_token:         Option<String>,
    pub verification_token_expires: Option<chrono::DateTime<chrono::Utc>>,
    /// Linked user account, set on first successful verification.
    pub user_id:                    Option<Uuid>,
    pub created_at:                 chrono::DateTime<chrono::Utc>,
    pub updated_at:                 chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ports::Entity",
        from = "Column::PortId",
        to = "super::ports::Column::Id"
    )]
    Port,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::ports::Entity> for Entity {
    fn to() -> RelationDef { Relation::Port.def() }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Contact status enumeration
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ContactStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactStatus::Active => write!(f, "active"),
            ContactStatus::Inactive => write!(f, "inactive"),
        }
    }
}
