//! Organizations Entity
//!
//! A maritime port organization. Owns zero or more ports.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                Uuid,
    pub organization_name: String,
    pub display_name:      Option<String>,
    pub organization_code: Option<String>,
    pub country:           Option<String>,
    pub is_active:         bool,
    pub created_at:        chrono::DateTime<chrono::Utc>,
    pub updated_at:        chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ports::Entity")]
    Ports,
}

impl Related<super::ports::Entity> for Entity {
    fn to() -> RelationDef { Relation::Ports.def() }
}

impl ActiveModelBehavior for ActiveModel {}
