//! Ports Entity
//!
//! A port belonging to an organization. Owns terminals and admin contacts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:              Uuid,
    pub port_name:       String,
    pub display_name:    Option<String>,
    pub organization_id: Uuid,
    pub country:         Option<String>,
    pub state:           Option<String>,
    pub is_active:       bool,
    pub created_at:      chrono::DateTime<chrono::Utc>,
    pub updated_at:      chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organizations::Entity",
        from = "Column::OrganizationId",
        to = "super::organizations::Column::Id"
    )]
    Organization,
    #[sea_orm(has_many = "super::terminals::Entity")]
    Terminals,
    #[sea_orm(has_many = "super::port_admin_contacts::Entity")]
    PortAdminContacts,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef { Relation::Organization.def() }
}

impl Related<super::terminals::Entity> for Entity {
    fn to() -> RelationDef { Relation::Terminals.def() }
}

impl Related<super::port_admin_contacts::Entity> for Entity {
    fn to() -> RelationDef { Relation::PortAdminContacts.def() }
}

impl ActiveModelBehavior for ActiveModel {}
