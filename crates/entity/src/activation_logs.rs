//! Activation Logs Entity
//!
//! Append-only audit trail of terminal lifecycle events. Rows are never
//! updated or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "activation_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:           Uuid,
    pub terminal_id:  Uuid,
    pub action:       String,
    pub description:  String,
    pub performed_by: Option<Uuid>,
    /// Serialized snapshot of the fields the action touched.
    pub data:         Option<Json>,
    pub created_at:   chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::terminals::Entity",
        from = "Column::TerminalId",
        to = "super::terminals::Column::Id"
    )]
    Terminal,
}

impl Related<super::terminals::Entity> for Entity {
    fn to() -> RelationDef { Relation::Terminal.def() }
}

impl ActiveModelBehavior for ActiveModel {}
