//! # Terminal Handlers
//!
//! Terminal listing, submission, update, activation and the admin status
//! override. Activation and the status override are SystemAdmin-only; the
//! role check happens here so the gate is enforced even when the handler
//! is invoked outside the router.

use axum::Json;
use error::{AppError, Result};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;
use validator::Validate;

use crate::dto::terminals::{
    ActivateTerminalRequest, ActivationLogEntry, CreateTerminalRequest, SetTerminalStatusRequest, TerminalInfo,
    UpdateTerminalRequest,
};
use crate::dto::DataResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::{lifecycle, AppState};

/// Lists the terminals of one port, newest first.
pub async fn list_port_terminals_inner(
    state: &AppState,
    port_id: Uuid,
) -> Result<Json<DataResponse<Vec<TerminalInfo>>>> {
    entity::ports::Entity::find_by_id(port_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Port not found"))?;

    let rows = entity::terminals::Entity::find()
        .filter(entity::terminals::Column::PortId.eq(port_id))
        .order_by_desc(entity::terminals::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(DataResponse::ok(rows.iter().map(TerminalInfo::from).collect())))
}

/// Fetches one terminal.
pub async fn get_terminal_inner(state: &AppState, id: Uuid) -> Result<Json<DataResponse<TerminalInfo>>> {
    let terminal = entity::terminals::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Terminal not found"))?;
    Ok(Json(DataResponse::ok(TerminalInfo::from(&terminal))))
}

/// Submits a terminal under a port.
pub async fn create_terminal_inner(
    state: &AppState,
    authenticated: AuthenticatedUser,
    port_id: Uuid,
    req: CreateTerminalRequest,
) -> Result<Json<DataResponse<TerminalInfo>>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    entity::ports::Entity::find_by_id(port_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Port not found"))?;

    let terminal = lifecycle::submit(&state.db, port_id, req.into(), Some(authenticated.id)).await?;

    Ok(Json(DataResponse::ok(TerminalInfo::from(&terminal))))
}

/// Updates a terminal; the applied field set is narrowed server-side when
/// the terminal is already active.
pub async fn update_terminal_inner(
    state: &AppState,
    authenticated: AuthenticatedUser,
    id: Uuid,
    req: UpdateTerminalRequest,
) -> Result<Json<DataResponse<TerminalInfo>>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    let terminal = lifecycle::update_terminal(&state.db, id, req.into(), Some(authenticated.id)).await?;

    Ok(Json(DataResponse::ok(TerminalInfo::from(&terminal))))
}

/// Activates a terminal with a subscription window. SystemAdmin only.
pub async fn activate_terminal_inner(
    state: &AppState,
    authenticated: AuthenticatedUser,
    id: Uuid,
    req: ActivateTerminalRequest,
) -> Result<Json<DataResponse<TerminalInfo>>> {
    if !authenticated.is_system_admin() {
        return Err(AppError::forbidden("System administrator role required"));
    }

    let terminal = lifecycle::activate(&state.db, id, req.into(), Some(authenticated.id)).await?;

    Ok(Json(DataResponse::ok(TerminalInfo::from(&terminal))))
}

/// Admin status override. SystemAdmin only; accepts exactly the three
/// lifecycle statuses.
pub async fn set_terminal_status_inner(
    state: &AppState,
    authenticated: AuthenticatedUser,
    id: Uuid,
    req: SetTerminalStatusRequest,
) -> Result<Json<DataResponse<TerminalInfo>>> {
    if !authenticated.is_system_admin() {
        return Err(AppError::forbidden("System administrator role required"));
    }

    let status = req
        .status
        .parse::<entity::terminals::TerminalStatus>()
        .map_err(|e| AppError::validation(e))?;

    let terminal = lifecycle::set_status(&state.db, id, status, Some(authenticated.id)).await?;

    Ok(Json(DataResponse::ok(TerminalInfo::from(&terminal))))
}

/// Returns the activation log of one terminal, newest first.
pub async fn terminal_activation_log_inner(
    state: &AppState,
    id: Uuid,
) -> Result<Json<DataResponse<Vec<ActivationLogEntry>>>> {
    entity::terminals::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Terminal not found"))?;

    let rows = entity::activation_logs::Entity::find()
        .filter(entity::activation_logs::Column::TerminalId.eq(id))
        .order_by_desc(entity::activation_logs::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(DataResponse::ok(rows.iter().map(ActivationLogEntry::from).collect())))
}
