//! # Organization Handlers
//!
//! CRUD over port organizations.

use axum::Json;
use chrono::Utc;
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;
use validator::Validate;

use crate::dto::organizations::{CreateOrganizationRequest, OrganizationInfo, UpdateOrganizationRequest};
use crate::dto::DataResponse;
use crate::AppState;

/// Lists all organizations, newest first.
pub async fn list_organizations_inner(state: &AppState) -> Result<Json<DataResponse<Vec<OrganizationInfo>>>> {
    let rows = entity::organizations::Entity::find()
        .order_by_desc(entity::organizations::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(DataResponse::ok(rows.iter().map(OrganizationInfo::from).collect())))
}

/// Fetches one organization.
pub async fn get_organization_inner(
    state: &AppState,
    id: Uuid,
) -> Result<Json<DataResponse<OrganizationInfo>>> {
    let organization = entity::organizations::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Organization not found"))?;
    Ok(Json(DataResponse::ok(OrganizationInfo::from(&organization))))
}

/// Creates an organization.
pub async fn create_organization_inner(
    state: &AppState,
    req: CreateOrganizationRequest,
) -> Result<Json<DataResponse<OrganizationInfo>>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    let now = Utc::now();
    let organization = entity::organizations::ActiveModel {
        id: Set(Uuid::new_v4()),
        organization_name: Set(req.organization_name),
        display_name: Set(req.display_name),
        organization_code: Set(req.organization_code),
        country: Set(req.country),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let organization = organization.insert(&state.db).await?;

    Ok(Json(DataResponse::ok(OrganizationInfo::from(&organization))))
}

/// Updates an organization. Absent fields are left alone.
pub async fn update_organization_inner(
    state: &AppState,
    id: Uuid,
    req: UpdateOrganizationRequest,
) -> Result<Json<DataResponse<OrganizationInfo>>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    let organization = entity::organizations::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Organization not found"))?;

    let mut active: entity::organizations::ActiveModel = organization.into();
    if let Some(v) = req.organization_name {
        active.organization_name = Set(v);
    }
    if let Some(v) = req.display_name {
        active.display_name = Set(Some(v));
    }
    if let Some(v) = req.organization_code {
        active.organization_code = Set(Some(v));
    }
    if let Some(v) = req.country {
        active.country = Set(Some(v));
    }
    if let Some(v) = req.is_active {
        active.is_active = Set(v);
    }
    active.updated_at = Set(Utc::now());
    let organization = active.update(&state.db).await?;

    Ok(Json(DataResponse::ok(OrganizationInfo::from(&organization))))
}
