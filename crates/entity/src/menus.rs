//! Menus Entity
//!
//! Self-referential two-level navigation tree. Glink (group link) nodes are
//! top-level and may own plink (page link) children; a plink's parent must
//! be a glink. `sort_order` determines sibling order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "menus")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:         Uuid,
    pub name:       String,
    pub label:      String,
    pub menu_type:  MenuType,
    pub parent_id:  Option<Uuid>,
    pub route:      Option<String>,
    pub sort_order: i32,
    pub is_active:  bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

/// Menu node type
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum MenuType {
    /// Top-level group link; never has a parent
    #[sea_orm(string_value = "glink")]
    Glink,
    /// Child page link; parent must be a glink
    #[sea_orm(string_value = "plink")]
    Plink,
}

impl std::fmt::Display for MenuType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuType::Glink => write!(f, "glink"),
            MenuType::Plink => write!(f, "plink"),
        }
    }
}
