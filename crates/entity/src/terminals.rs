//! Terminals Entity
//!
//! The core lifecycle entity. A terminal is submitted in
//! "Processing for activation", then either activated with a subscription
//! window or rejected by a system admin. Once Active, subscription and
//! activation fields are immutable until explicitly re-activated.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "terminals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                    Uuid,
    pub port_id:               Uuid,
    pub terminal_name:         String,
    pub short_code:            Option<String>,
    pub status:                TerminalStatus,
    pub is_active:             bool,
    pub subscription_type_id:  Option<i32>,
    /// Invariant: always `activation_start_date + subscription months`,
    /// computed at activation time and never independently edited.
    pub activation_start_date: Option<Date>,
    pub activation_end_date:   Option<Date>,
    pub work_order_no:         Option<String>,
    pub work_order_date:       Option<Date>,
    pub tax_id:                Option<String>,
    pub currency:              Option<String>,
    pub timezone:              Option<String>,
    pub billing_address:       Option<String>,
    pub billing_city:          Option<String>,
    pub billing_country:       Option<String>,
    pub shipping_address:      Option<String>,
    pub shipping_city:         Option<String>,
    pub shipping_country:      Option<String>,
    pub created_by:            Option<Uuid>,
    pub created_at:            chrono::DateTime<chrono::Utc>,
    pub updated_at:            chrono::DateTime<chrono::Utc>,
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
        belongs_to = "super::subscription_types::Entity",
        from = "Column::SubscriptionTypeId",
        to = "super::subscription_types::Column::Id"
    )]
    SubscriptionType,
    #[sea_orm(has_many = "super::activation_logs::Entity")]
    ActivationLogs,
}

impl Related<super::ports::Entity> for Entity {
    fn to() -> RelationDef { Relation::Port.def() }
}

impl Related<super::subscription_types::Entity> for Entity {
    fn to() -> RelationDef { Relation::SubscriptionType.def() }
}

impl Related<super::activation_logs::Entity> for Entity {
    fn to() -> RelationDef { Relation::ActivationLogs.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Terminal lifecycle status
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum TerminalStatus {
    /// Submitted and awaiting admin review
    #[sea_orm(string_value = "Processing for activation")]
    #[serde(rename = "Processing for activation")]
    Processing,
    /// Activated with a subscription window
    #[sea_orm(string_value = "Active")]
    Active,
    /// Rejected by a system admin
    #[sea_orm(string_value = "Rejected")]
    Rejected,
}

impl std::fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalStatus::Processing => write!(f, "Processing for activation"),
            TerminalStatus::Active => write!(f, "Active"),
            TerminalStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

impl std::str::FromStr for TerminalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing for activation" => Ok(TerminalStatus::Processing),
            "Active" => Ok(TerminalStatus::Active),
            "Rejected" => Ok(TerminalStatus::Rejected),
            other => Err(format!("Invalid terminal status: {}", other)),
        }
    }
}
