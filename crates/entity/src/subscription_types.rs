//! Subscription Types Entity
//!
//! Fixed lookup of subscription lengths (1/12/24/48 months) used to compute
//! a terminal's activation end date.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "subscription_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:     i32,
    pub name:   String,
    pub months: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::terminals::Entity")]
    Terminals,
}

impl Related<super::terminals::Entity> for Entity {
    fn to() -> RelationDef { Relation::Terminals.def() }
}

impl ActiveModelBehavior for ActiveModel {}
