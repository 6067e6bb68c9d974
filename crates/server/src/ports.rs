//! # Port Handlers
//!
//! CRUD over ports plus the active/inactive toggle.

use axum::Json;
use chrono::Utc;
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::ports::{CreatePortRequest, PortInfo, UpdatePortRequest};
use crate::dto::DataResponse;
use crate::AppState;

/// Lists all ports, newest first.
pub async fn list_ports_inner(state: &AppState) -> Result<Json<DataResponse<Vec<PortInfo>>>> {
    let rows = entity::ports::Entity::find()
        .order_by_desc(entity::ports::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(DataResponse::ok(rows.iter().map(PortInfo::from).collect())))
}

/// Fetches one port.
pub async fn get_port_inner(state: &AppState, id: Uuid) -> Result<Json<DataResponse<PortInfo>>> {
    let port = entity::ports::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Port not found"))?;
    Ok(Json(DataResponse::ok(PortInfo::from(&port))))
}

/// Creates a port under an organization.
///
/// # Errors
///
/// Returns a validation error when the owning organization does not exist.
pub async fn create_port_inner(
    state: &AppState,
    req: CreatePortRequest,
) -> Result<Json<DataResponse<PortInfo>>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    entity::organizations::Entity::find_by_id(req.organization_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::validation("Organization does not exist"))?;

    let now = Utc::now();
    let port = entity::ports::ActiveModel {
        id: Set(Uuid::new_v4()),
        port_name: Set(req.port_name),
        display_name: Set(req.display_name),
        organization_id: Set(req.organization_id),
        country: Set(req.country),
        state: Set(req.state),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let port = port.insert(&state.db).await?;

    info!(port_id = %port.id, "Port created");

    Ok(Json(DataResponse::ok(PortInfo::from(&port))))
}

/// Updates a port. Absent fields are left alone.
pub async fn update_port_inner(
    state: &AppState,
    id: Uuid,
    req: UpdatePortRequest,
) -> Result<Json<DataResponse<PortInfo>>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    let port = entity::ports::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Port not found"))?;

    let mut active: entity::ports::ActiveModel = port.into();
    if let Some(v) = req.port_name {
        active.port_name = Set(v);
    }
    if let Some(v) = req.display_name {
        active.display_name = Set(Some(v));
    }
    if let Some(v) = req.country {
        active.country = Set(Some(v));
    }
    if let Some(v) = req.state {
        active.state = Set(Some(v));
    }
    active.updated_at = Set(Utc::now());
    let port = active.update(&state.db).await?;

    Ok(Json(DataResponse::ok(PortInfo::from(&port))))
}

/// Flips a port's active flag.
pub async fn toggle_port_status_inner(state: &AppState, id: Uuid) -> Result<Json<DataResponse<PortInfo>>> {
    let port = entity::ports::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Port not found"))?;

    let flipped = !port.is_active;
    let mut active: entity::ports::ActiveModel = port.into();
    active.is_active = Set(flipped);
    active.updated_at = Set(Utc::now());
    let port = active.update(&state.db).await?;

    info!(port_id = %port.id, is_active = port.is_active, "Port status toggled");

    Ok(Json(DataResponse::ok(PortInfo::from(&port))))
}
