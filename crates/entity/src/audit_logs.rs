//! Audit Logs Entity
//!
//! Append-only record of account lifecycle events (created, updated,
//! role_changed, verified, password_setup, deleted, login).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:           Uuid,
    /// Subject of the event (the account acted upon).
    pub user_id:      Option<Uuid>,
    pub action:       String,
    pub description:  String,
    pub performed_by: Option<Uuid>,
    pub data:         Option<Json>,
    pub created_at:   chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
