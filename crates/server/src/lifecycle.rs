//! # Terminal Lifecycle
//!
//! Status machine for terminals:
//!
//! ```text
//! Processing for activation --activate--> Active
//! Processing for activation --reject----> Rejected
//! ```
//!
//! There is no transition out of `Active` or `Rejected` back to
//! `Processing`; re-activating an `Active` terminal is a renewal that
//! supplies fresh subscription parameters. Activation runs inside a
//! transaction so the subscription lookup and the status write cannot race
//! a concurrent activation. Every mutation appends one activation log
//! entry; admin notifications are emitted after commit, best-effort.

use chrono::{Months, NaiveDate, Utc};
use entity::terminals::{Entity as TerminalsEntity, TerminalStatus};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, DbConn, EntityTrait, Set, TransactionError, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use crate::{audit, notify};

/// Fields accepted when submitting a terminal for activation.
#[derive(Debug, Clone, Default)]
pub struct TerminalDraft {
    pub terminal_name:    String,
    pub short_code:       Option<String>,
    pub status:           Option<TerminalStatus>,
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

/// Fields accepted by a terminal update. `None` leaves the column alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerminalUpdate {
    pub terminal_name:         Option<String>,
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

/// Subscription parameters supplied at activation time.
#[derive(Debug, Clone)]
pub struct ActivationRequest {
    pub activation_start_date: NaiveDate,
    pub subscription_type_id:  i32,
    pub work_order_no:         Option<String>,
    pub work_order_date:       Option<NaiveDate>,
}

/// Computes the subscription end date from a start date and a month count.
///
/// Calendar-month arithmetic, not fixed 30-day blocks: the day-of-month is
/// clamped to the last valid day of the target month, so
/// `2024-01-31 + 1 month == 2024-02-29`.
pub fn compute_end_date(start: NaiveDate, months: i32) -> Result<NaiveDate> {
    let months =
        u32::try_from(months).map_err(|_| AppError::validation("Subscription months must be non-negative"))?;

    start
        .checked_add_months(Months::new(months))
        .ok_or_else(|| AppError::validation("Activation start date out of range"))
}

/// Narrows an update against an `Active` terminal to the allow-listed
/// fields: name, codes, tax id, currency, timezone and both address
/// blocks. Subscription and activation fields are dropped silently rather
/// than rejected.
#[must_use]
pub fn narrow_update_for_active(update: TerminalUpdate) -> TerminalUpdate {
    TerminalUpdate {
        terminal_name: update.terminal_name,
        short_code: update.short_code,
        tax_id: update.tax_id,
        currency: update.currency,
        timezone: update.timezone,
        billing_address: update.billing_address,
        billing_city: update.billing_city,
        billing_country: update.billing_country,
        shipping_address: update.shipping_address,
        shipping_city: update.shipping_city,
        shipping_country: update.shipping_country,
        ..TerminalUpdate::default()
    }
}

fn apply_update(active: &mut entity::terminals::ActiveModel, update: TerminalUpdate) {
    if let Some(v) = update.terminal_name {
        active.terminal_name = Set(v);
    }
    if let Some(v) = update.short_code {
        active.short_code = Set(Some(v));
    }
    if let Some(v) = update.status {
        active.status = Set(v);
    }
    if let Some(v) = update.subscription_type_id {
        active.subscription_type_id = Set(Some(v));
    }
    if let Some(v) = update.activation_start_date {
        active.activation_start_date = Set(Some(v));
    }
    if let Some(v) = update.work_order_no {
        active.work_order_no = Set(Some(v));
    }
    if let Some(v) = update.work_order_date {
        active.work_order_date = Set(Some(v));
    }
    if let Some(v) = update.tax_id {
        active.tax_id = Set(Some(v));
    }
    if let Some(v) = update.currency {
        active.currency = Set(Some(v));
    }
    if let Some(v) = update.timezone {
        active.timezone = Set(Some(v));
    }
    if let Some(v) = update.billing_address {
        active.billing_address = Set(Some(v));
    }
    if let Some(v) = update.billing_city {
        active.billing_city = Set(Some(v));
    }
    if let Some(v) = update.billing_country {
        active.billing_country = Set(Some(v));
    }
    if let Some(v) = update.shipping_address {
        active.shipping_address = Set(Some(v));
    }
    if let Some(v) = update.shipping_city {
        active.shipping_city = Set(Some(v));
    }
    if let Some(v) = update.shipping_country {
        active.shipping_country = Set(Some(v));
    }
}

/// Submits a new terminal under a port.
///
/// The terminal starts in `Processing for activation` unless the draft
/// says otherwise. Appends a `submitted` activation log entry and, only
/// when the resulting status is exactly `Processing for activation`,
/// notifies every system admin inbox.
pub async fn submit(
    db: &DbConn,
    port_id: Uuid,
    draft: TerminalDraft,
    created_by: Option<Uuid>,
) -> Result<entity::terminals::Model> {
    let status = draft.status.unwrap_or(TerminalStatus::Processing);
    let now = Utc::now();

    let terminal = entity::terminals::ActiveModel {
        id: Set(Uuid::new_v4()),
        port_id: Set(port_id),
        terminal_name: Set(draft.terminal_name),
        short_code: Set(draft.short_code),
        status: Set(status.clone()),
        is_active: Set(true),
        subscription_type_id: Set(None),
        activation_start_date: Set(None),
        activation_end_date: Set(None),
        work_order_no: Set(None),
        work_order_date: Set(None),
        tax_id: Set(draft.tax_id),
        currency: Set(draft.currency),
        timezone: Set(draft.timezone),
        billing_address: Set(draft.billing_address),
        billing_city: Set(draft.billing_city),
        billing_country: Set(draft.billing_country),
        shipping_address: Set(draft.shipping_address),
        shipping_city: Set(draft.shipping_city),
        shipping_country: Set(draft.shipping_country),
        created_by: Set(created_by),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let terminal = terminal.insert(db).await?;

    audit::log_terminal_event(
        db,
        terminal.id,
        "submitted",
        format!(
            "Terminal '{}' submitted with status '{}'",
            terminal.terminal_name, terminal.status
        ),
        created_by,
        None,
    )
    .await;

    if terminal.status == TerminalStatus::Processing {
        notify_activation_request(db, &terminal).await;
    }

    info!(terminal_id = %terminal.id, status = %terminal.status, "Terminal submitted");

    Ok(terminal)
}

/// Activates a terminal with a subscription window.
///
/// Looks up the subscription type, computes
/// `activation_end_date = activation_start_date + months`, sets the status
/// to `Active` and persists the work-order metadata. Lookup and write run
/// in one transaction so concurrent activations of the same terminal
/// serialize instead of losing updates. Role enforcement happens at the
/// router; this function trusts `performed_by`.
pub async fn activate(
    db: &DbConn,
    terminal_id: Uuid,
    request: ActivationRequest,
    performed_by: Option<Uuid>,
) -> Result<entity::terminals::Model> {
    let terminal = db
        .transaction::<_, entity::terminals::Model, AppError>(move |txn| {
            Box::pin(async move {
                let terminal = TerminalsEntity::find_by_id(terminal_id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| AppError::not_found("Terminal not found"))?;

                let subscription = entity::subscription_types::Entity::find_by_id(request.subscription_type_id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| AppError::validation("Invalid subscription type"))?;

                let end_date = compute_end_date(request.activation_start_date, subscription.months)?;
                let name = terminal.terminal_name.clone();

                let mut active: entity::terminals::ActiveModel = terminal.into();
                active.status = Set(TerminalStatus::Active);
                active.is_active = Set(true);
                active.subscription_type_id = Set(Some(subscription.id));
                active.activation_start_date = Set(Some(request.activation_start_date));
                active.activation_end_date = Set(Some(end_date));
                active.work_order_no = Set(request.work_order_no.clone());
                active.work_order_date = Set(request.work_order_date);
                active.updated_at = Set(Utc::now());
                let terminal = active.update(txn).await?;

                audit::log_terminal_event(
                    txn,
                    terminal.id,
                    "activated",
                    format!(
                        "Terminal '{}' activated with {} month(s) subscription from {} to {}",
                        name, subscription.months, request.activation_start_date, end_date
                    ),
                    performed_by,
                    Some(serde_json::json!({
                        "subscriptionTypeId": subscription.id,
                        "activationStartDate": request.activation_start_date,
                        "activationEndDate": end_date,
                    })),
                )
                .await;

                Ok(terminal)
            })
        })
        .await
        .map_err(|e| {
            match e {
                TransactionError::Connection(err) => AppError::from(err),
                TransactionError::Transaction(err) => err,
            }
        })?;

    info!(terminal_id = %terminal.id, "Terminal activated");

    Ok(terminal)
}

/// Admin status override. Accepts only the three lifecycle statuses and
/// appends a `status_changed` log entry.
pub async fn set_status(
    db: &DbConn,
    terminal_id: Uuid,
    status: TerminalStatus,
    performed_by: Option<Uuid>,
) -> Result<entity::terminals::Model> {
    let terminal = TerminalsEntity::find_by_id(terminal_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Terminal not found"))?;

    let previous = terminal.status.clone();
    let name = terminal.terminal_name.clone();

    let mut active: entity::terminals::ActiveModel = terminal.into();
    active.status = Set(status.clone());
    active.updated_at = Set(Utc::now());
    let terminal = active.update(db).await?;

    audit::log_terminal_event(
        db,
        terminal.id,
        "status_changed",
        format!("Terminal '{}' status changed from '{}' to '{}'", name, previous, status),
        performed_by,
        None,
    )
    .await;

    info!(terminal_id = %terminal.id, from = %previous, to = %status, "Terminal status overridden");

    Ok(terminal)
}

/// Updates a terminal.
///
/// When the terminal is already `Active`, the update is narrowed to the
/// allow-listed fields and subscription/activation fields in the request
/// are dropped without error. When not yet active, every field applies,
/// including a client-supplied status that re-triggers the admin
/// notification exactly as at creation.
pub async fn update_terminal(
    db: &DbConn,
    terminal_id: Uuid,
    update: TerminalUpdate,
    performed_by: Option<Uuid>,
) -> Result<entity::terminals::Model> {
    let terminal = TerminalsEntity::find_by_id(terminal_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Terminal not found"))?;

    let was_active = terminal.status == TerminalStatus::Active;
    let update = if was_active {
        narrow_update_for_active(update)
    }
    else {
        update
    };
    let became_processing = !was_active && update.status == Some(TerminalStatus::Processing);
    let name = terminal.terminal_name.clone();

    let mut active: entity::terminals::ActiveModel = terminal.into();
    apply_update(&mut active, update);
    active.updated_at = Set(Utc::now());
    let terminal = active.update(db).await?;

    let description = if was_active {
        format!(
            "Terminal '{}' details updated; subscription fields are locked while the terminal is active",
            name
        )
    }
    else {
        format!("Terminal '{}' updated", name)
    };
    audit::log_terminal_event(db, terminal.id, "updated", description, performed_by, None).await;

    if became_processing {
        notify_activation_request(db, &terminal).await;
    }

    Ok(terminal)
}

/// Notifies every system admin that a terminal awaits activation review.
async fn notify_activation_request(db: &DbConn, terminal: &entity::terminals::Model) {
    notify::notify_system_admins(
        db,
        "terminal_activation",
        "Terminal activation request",
        &format!("Terminal '{}' is awaiting activation review", terminal.terminal_name),
        Some(serde_json::json!({ "terminalId": terminal.id, "portId": terminal.port_id })),
    )
    .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_date_plain_month_addition() {
        assert_eq!(compute_end_date(date(2025, 1, 1), 12).unwrap(), date(2026, 1, 1));
        assert_eq!(compute_end_date(date(2025, 3, 15), 1).unwrap(), date(2025, 4, 15));
        assert_eq!(compute_end_date(date(2025, 6, 1), 24).unwrap(), date(2027, 6, 1));
        assert_eq!(compute_end_date(date(2025, 6, 1), 48).unwrap(), date(2029, 6, 1));
    }

    #[test]
    fn test_end_date_clamps_to_last_valid_day() {
        // Calendar-month semantics: Jan 31 + 1 month lands on the leap-day
        // in 2024 and on Feb 28 in a common year.
        assert_eq!(compute_end_date(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(compute_end_date(date(2025, 1, 31), 1).unwrap(), date(2025, 2, 28));
        assert_eq!(compute_end_date(date(2025, 8, 31), 1).unwrap(), date(2025, 9, 30));
    }

    #[test]
    fn test_end_date_rejects_negative_months() {
        assert!(compute_end_date(date(2025, 1, 1), -1).is_err());
    }

    #[test]
    fn test_narrowing_drops_subscription_fields() {
        let update = TerminalUpdate {
            terminal_name: Some("North Quay".to_string()),
            subscription_type_id: Some(2),
            activation_start_date: Some(date(2025, 1, 1)),
            work_order_no: Some("WO-42".to_string()),
            status: Some(TerminalStatus::Processing),
            currency: Some("EUR".to_string()),
            ..TerminalUpdate::default()
        };

        let narrowed = narrow_update_for_active(update);

        assert_eq!(narrowed.terminal_name.as_deref(), Some("North Quay"));
        assert_eq!(narrowed.currency.as_deref(), Some("EUR"));
        assert_eq!(narrowed.subscription_type_id, None);
        assert_eq!(narrowed.activation_start_date, None);
        assert_eq!(narrowed.work_order_no, None);
        assert_eq!(narrowed.status, None);
    }

    #[test]
    fn test_narrowing_keeps_address_fields() {
        let update = TerminalUpdate {
            billing_address: Some("1 Harbour Rd".to_string()),
            shipping_country: Some("NL".to_string()),
            tax_id: Some("TX-9".to_string()),
            timezone: Some("Europe/Amsterdam".to_string()),
            ..TerminalUpdate::default()
        };

        let narrowed = narrow_update_for_active(update.clone());
        assert_eq!(narrowed, update);
    }
}
