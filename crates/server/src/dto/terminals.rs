//! Terminal request and response types.

use chrono::{DateTime, NaiveDate, Utc};
use entity::terminals::TerminalStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::lifecycle::{ActivationRequest, TerminalDraft, TerminalUpdate};

/// Request body for submitting a terminal under a port
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTerminalRequest {
    /// Terminal name
    #[validate(length(min = 1, max = 255, message = "Terminal name is required"))]
    pub terminal_name: String,

    /// Short code used in listings
    #[validate(length(max = 16, message = "Short code must be at most 16 characters"))]
    pub short_code: Option<String>,

    /// Initial status; defaults to "Processing for activation"
    pub status: Option<TerminalStatus>,

    pub tax_id:           Option<String>,
    pub currency:         Option<String>,
    pub timezone:         Option<String>,
    pub billing_address:  Option<String>,
    pub billing_city:     Option<String>,
    pub billing_country:  Option<String>,
    pub shipping_address: Option<String>,
    pub shipping_city:    Option<String>,
    pub shipping_country: Option<String>,
}

impl From<CreateTerminalRequest> for TerminalDraft {
    fn from(req: CreateTerminalRequest) -> Self {
        Self {
            terminal_name:    req.terminal_name,
            short_code:       req.short_code,
            status:           req.status,
            tax_id:           req.tax_id,
            currency:         req.currency,
            timezone:         req.timezone,
            billing_address:  req.billing_address,
            billing_city:     req.billing_city,
            billing_country:  req.billing_country,
            shipping_address: req.shipping_address,
            shipping_city:    req.shipping_city,
            shipping_country: req.shipping_country,
        }
    }
}

/// Request body for updating a terminal. Subscription and activation
/// fields in here are dropped server-side when the terminal is already
/// active.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTerminalRequest {
    #[validate(length(min = 1, max = 255, message = "Terminal name must not be empty"))]
    pub terminal_name:         Option<String>,
    #[validate(length(max = 16, message = "Short code must be at most 16 characters"))]
    pub short_code:            Option<String>,
    pub status:                Option<TerminalStatus>,
    pub subscription_type_id:  Option<i32>,
    pub activation_start_date: Option<NaiveDate>,
    pub work_order_no:         Option<String>,
    pub work_order_date:       Option<NaiveDate>,
    pub tax_id:                Option<String>,
    pub currency:              Option<String>,
    pub timezone:              Option<String>,
    pub billing_address:       Option<String>,
    pub billing_city:          Option<String>,
    pub billing_country:       Option<String>,
    pub shipping_address:      Option<String>,
    pub shipping_city:         Option<String>,
    pub shipping_country:      Option<String>,
}

impl From<UpdateTerminalRequest> for TerminalUpdate {
    fn from(req: UpdateTerminalRequest) -> Self {
        Self {
            terminal_name:         req.terminal_name,
            short_code:            req.short_code,
            status:                req.status,
            subscription_type_id:  req.subscription_type_id,
            activation_start_date: req.activation_start_date,
            work_order_no:         req.work_order_no,
            work_order_date:       req.work_order_date,
            tax_id:                req.tax_id,
            currency:              req.currency,
            timezone:              req.timezone,
            billing_address:       req.billing_address,
            billing_city:          req.billing_city,
            billing_country:       req.billing_country,
            shipping_address:      req.shipping_address,
            shipping_city:         req.shipping_city,
            shipping_country:      req.shipping_country,
        }
    }
}

/// Request body for activating a terminal with a subscription window
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActivateTerminalRequest {
    /// First day of the subscription window
    pub activation_start_date: NaiveDate,

    /// Subscription plan to apply
    pub subscription_type_id: i32,

    /// External work order reference
    pub work_order_no: Option<String>,

    /// Date of the work order
    pub work_order_date: Option<NaiveDate>,
}

impl From<ActivateTerminalRequest> for ActivationRequest {
    fn from(req: ActivateTerminalRequest) -> Self {
        Self {
            activation_start_date: req.activation_start_date,
            subscription_type_id:  req.subscription_type_id,
            work_order_no:         req.work_order_no,
            work_order_date:       req.work_order_date,
        }
    }
}

/// Request body for the admin status override
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTerminalStatusRequest {
    /// One of the three lifecycle statuses, as its wire string
    pub status: String,
}

/// Terminal as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalInfo {
    pub id:                    Uuid,
    pub port_id:               Uuid,
    pub terminal_name:         String,
    pub short_code:            Option<String>,
    pub status:                TerminalStatus,
    pub is_active:             bool,
    pub subscription_type_id:  Option<i32>,
    pub activation_start_date: Option<NaiveDate>,
    pub activation_end_date:   Option<NaiveDate>,
    pub work_order_no:         Option<String>,
    pub work_order_date:       Option<NaiveDate>,
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
    pub created_at:            DateTime<Utc>,
    pub updated_at:            DateTime<Utc>,
}

impl From<&entity::terminals::Model> for TerminalInfo {
    fn from(terminal: &entity::terminals::Model) -> Self {
        Self {
            id:                    terminal.id,
            port_id:               terminal.port_id,
            terminal_name:         terminal.terminal_name.clone(),
            short_code:            terminal.short_code.clone(),
            status:                terminal.status.clone(),
            is_active:             terminal.is_active,
            subscription_type_id:  terminal.subscription_type_id,
            activation_start_date: terminal.activation_start_date,
            activation_end_date:   terminal.activation_end_date,
            work_order_no:         terminal.work_order_no.clone(),
            work_order_date:       terminal.work_order_date,
            tax_id:                terminal.tax_id.clone(),
            currency:              terminal.currency.clone(),
            timezone:              terminal.timezone.clone(),
            billing_address:       terminal.billing_address.clone(),
            billing_city:          terminal.billing_city.clone(),
            billing_country:       terminal.billing_country.clone(),
            shipping_address:      terminal.shipping_address.clone(),
            shipping_city:         terminal.shipping_city.clone(),
            shipping_country:      terminal.shipping_country.clone(),
            created_by:            terminal.created_by,
            created_at:            terminal.created_at,
            updated_at:            terminal.updated_at,
        }
    }
}

/// One activation log row as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationLogEntry {
    pub id:           Uuid,
    pub terminal_id:  Uuid,
    pub action:       String,
    pub description:  String,
    pub performed_by: Option<Uuid>,
    pub data:         Option<serde_json::Value>,
    pub created_at:   DateTime<Utc>,
}

impl From<&entity::activation_logs::Model> for ActivationLogEntry {
    fn from(log: &entity::activation_logs::Model) -> Self {
        Self {
            id:           log.id,
            terminal_id:  log.terminal_id,
            action:       log.action.clone(),
            description:  log.description.clone(),
            performed_by: log.performed_by,
            data:         log.data.clone(),
            created_at:   log.created_at,
        }
    }
}
