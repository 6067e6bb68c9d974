//! # API Router Configuration
//!
//! Configures API routes for the PortRay application. Route wrappers do
//! the axum extraction and delegate to the inner handlers, which hold the
//! behavior and stay callable from tests.

use axum::{
    extract::{Extension, Path, Query, State as AxumState},
    http::HeaderMap,
    middleware,
    routing::{delete, get, patch, post, put},
    Json,
    Router,
};
use error::Result;
use serde::Deserialize;
use uuid::Uuid;

use crate::dto::auth::{LoginRequest, LoginResponse, MeResponse, SetupPasswordRequest};
use crate::dto::contacts::{ContactInfo, CreateContactRequest, UpdateContactRequest};
use crate::dto::menus::{CreateMenuRequest, MenuTreeNode, ReorderMenusRequest, UpdateMenuRequest};
use crate::dto::notifications::NotificationInfo;
use crate::dto::organizations::{CreateOrganizationRequest, OrganizationInfo, UpdateOrganizationRequest};
use crate::dto::ports::{CreatePortRequest, PortInfo, UpdatePortRequest};
use crate::dto::terminals::{
    ActivateTerminalRequest, ActivationLogEntry, CreateTerminalRequest, SetTerminalStatusRequest, TerminalInfo,
    UpdateTerminalRequest,
};
use crate::dto::{DataResponse, SuccessResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::AppState;

/// Creates the API router with all routes
///
/// # Arguments
///
/// * `state` - Application state containing the DB connection and mailer
///
/// # Returns
///
/// Configured Axum router with all routes
pub fn create_router(state: AppState) -> Router {
    // System-admin-only routes (menu management)
    let admin_routes = Router::new()
        .route("/api/menus", post(create_menu_handler))
        .route("/api/menus/reorder", patch(reorder_menus_handler))
        .route("/api/menus/:id", patch(update_menu_handler))
        .route("/api/menus/:id", delete(delete_menu_handler))
        .layer(middleware::from_fn(crate::middleware::auth::require_system_admin));

    // Protected routes that require authentication
    let protected_routes = Router::new()
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/auth/me", get(me_handler))
        .route("/api/organizations", get(list_organizations_handler))
        .route("/api/organizations", post(create_organization_handler))
        .route("/api/organizations/:id", get(get_organization_handler))
        .route("/api/organizations/:id", put(update_organization_handler))
        .route("/api/ports", get(list_ports_handler))
        .route("/api/ports", post(create_port_handler))
        .route("/api/ports/:id", get(get_port_handler))
        .route("/api/ports/:id", put(update_port_handler))
        .route("/api/ports/:id/toggle-status", patch(toggle_port_status_handler))
        .route("/api/ports/:port_id/terminals", get(list_port_terminals_handler))
        .route("/api/ports/:port_id/terminals", post(create_terminal_handler))
        .route("/api/terminals/:id", get(get_terminal_handler))
        .route("/api/terminals/:id", put(update_terminal_handler))
        .route("/api/terminals/:id/activate", put(activate_terminal_handler))
        .route("/api/terminals/:id/status", put(set_terminal_status_handler))
        .route("/api/terminals/:id/activation-log", get(terminal_activation_log_handler))
        .route("/api/contacts", get(list_contacts_handler))
        .route("/api/contacts", post(create_contact_handler))
        .route("/api/contacts/:id", patch(update_contact_handler))
        .route(
            "/api/contacts/:id/resend-verification",
            post(resend_verification_handler),
        )
        .route("/api/contacts/:id/toggle-status", patch(toggle_contact_status_handler))
        .route("/api/menus", get(list_menus_handler))
        .route("/api/notifications", get(list_notifications_handler))
        .route("/api/notifications/unread-count", get(unread_count_handler))
        .route("/api/notifications/read-all", patch(mark_all_read_handler))
        .route("/api/notifications/:id/read", patch(mark_read_handler))
        .route("/api/notifications/:id", delete(delete_notification_handler))
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::auth_middleware,
        ));

    // Public routes that don't require authentication
    let public_routes = Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/verify", get(verify_handler))
        .route("/api/setup-password", post(setup_password_handler));

    public_routes.merge(protected_routes).with_state(state)
}

// --- Auth ---

async fn login_handler(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    crate::auth::handlers::login_handler_inner(&state, req).await
}

async fn logout_handler(AxumState(state): AxumState<AppState>, headers: HeaderMap) -> Result<Json<SuccessResponse>> {
    crate::auth::handlers::logout_handler_inner(&state, headers).await
}

async fn me_handler(
    AxumState(state): AxumState<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<Json<MeResponse>> {
    crate::auth::handlers::me_handler_inner(&state, authenticated).await
}

async fn setup_password_handler(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<SetupPasswordRequest>,
) -> Result<Json<LoginResponse>> {
    crate::auth::handlers::setup_password_handler_inner(&state, req).await
}

/// Query string for the verification link
#[derive(Debug, Deserialize)]
struct VerifyQuery {
    token: String,
}

async fn verify_handler(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Result<Json<DataResponse<ContactInfo>>> {
    crate::contacts::verify_contact_inner(&state, &query.token).await
}

// --- Organizations ---

async fn list_organizations_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<DataResponse<Vec<OrganizationInfo>>>> {
    crate::organizations::list_organizations_inner(&state).await
}

async fn get_organization_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<OrganizationInfo>>> {
    crate::organizations::get_organization_inner(&state, id).await
}

async fn create_organization_handler(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<Json<DataResponse<OrganizationInfo>>> {
    crate::organizations::create_organization_inner(&state, req).await
}

async fn update_organization_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrganizationRequest>,
) -> Result<Json<DataResponse<OrganizationInfo>>> {
    crate::organizations::update_organization_inner(&state, id, req).await
}

// --- Ports ---

async fn list_ports_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<DataResponse<Vec<PortInfo>>>> {
    crate::ports::list_ports_inner(&state).await
}

async fn get_port_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<PortInfo>>> {
    crate::ports::get_port_inner(&state, id).await
}

async fn create_port_handler(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreatePortRequest>,
) -> Result<Json<DataResponse<PortInfo>>> {
    crate::ports::create_port_inner(&state, req).await
}

async fn update_port_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePortRequest>,
) -> Result<Json<DataResponse<PortInfo>>> {
    crate::ports::update_port_inner(&state, id, req).await
}

async fn toggle_port_status_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<PortInfo>>> {
    crate::ports::toggle_port_status_inner(&state, id).await
}

// --- Terminals ---

async fn list_port_terminals_handler(
    AxumState(state): AxumState<AppState>,
    Path(port_id): Path<Uuid>,
) -> Result<Json<DataResponse<Vec<TerminalInfo>>>> {
    crate::terminals::list_port_terminals_inner(&state, port_id).await
}

async fn get_terminal_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<TerminalInfo>>> {
    crate::terminals::get_terminal_inner(&state, id).await
}

async fn create_terminal_handler(
    AxumState(state): AxumState<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(port_id): Path<Uuid>,
    Json(req): Json<CreateTerminalRequest>,
) -> Result<Json<DataResponse<TerminalInfo>>> {
    crate::terminals::create_terminal_inner(&state, authenticated, port_id, req).await
}

async fn update_terminal_handler(
    AxumState(state): AxumState<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTerminalRequest>,
) -> Result<Json<DataResponse<TerminalInfo>>> {
    crate::terminals::update_terminal_inner(&state, authenticated, id, req).await
}

async fn activate_terminal_handler(
    AxumState(state): AxumState<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<ActivateTerminalRequest>,
) -> Result<Json<DataResponse<TerminalInfo>>> {
    crate::terminals::activate_terminal_inner(&state, authenticated, id, req).await
}

async fn set_terminal_status_handler(
    AxumState(state): AxumState<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetTerminalStatusRequest>,
) -> Result<Json<DataResponse<TerminalInfo>>> {
    crate::terminals::set_terminal_status_inner(&state, authenticated, id, req).await
}

async fn terminal_activation_log_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<Vec<ActivationLogEntry>>>> {
    crate::terminals::terminal_activation_log_inner(&state, id).await
}

// --- Contacts ---

async fn list_contacts_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<DataResponse<Vec<ContactInfo>>>> {
    crate::contacts::list_contacts_inner(&state).await
}

async fn create_contact_handler(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateContactRequest>,
) -> Result<Json<DataResponse<ContactInfo>>> {
    crate::contacts::create_contact_inner(&state, req).await
}

async fn update_contact_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateContactRequest>,
) -> Result<Json<DataResponse<ContactInfo>>> {
    crate::contacts::update_contact_inner(&state, id, req).await
}

async fn resend_verification_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<ContactInfo>>> {
    crate::contacts::resend_verification_inner(&state, id).await
}

async fn toggle_contact_status_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<ContactInfo>>> {
    crate::contacts::toggle_contact_status_inner(&state, id).await
}

// --- Menus ---

async fn list_menus_handler(AxumState(state): AxumState<AppState>) -> Result<Json<DataResponse<Vec<MenuTreeNode>>>> {
    crate::menus::list_menus_inner(&state).await
}

async fn create_menu_handler(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateMenuRequest>,
) -> Result<Json<DataResponse<MenuTreeNode>>> {
    crate::menus::create_menu_inner(&state, req).await
}

async fn update_menu_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMenuRequest>,
) -> Result<Json<DataResponse<MenuTreeNode>>> {
    crate::menus::update_menu_inner(&state, id, req).await
}

async fn delete_menu_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>> {
    crate::menus::delete_menu_inner(&state, id).await
}

async fn reorder_menus_handler(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ReorderMenusRequest>,
) -> Result<Json<SuccessResponse>> {
    crate::menus::reorder_menus_inner(&state, req).await
}

// --- Notifications ---

async fn list_notifications_handler(
    AxumState(state): AxumState<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<Json<DataResponse<Vec<NotificationInfo>>>> {
    crate::notifications::list_notifications_inner(&state, authenticated).await
}

async fn unread_count_handler(
    AxumState(state): AxumState<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<Json<DataResponse<crate::notifications::UnreadCount>>> {
    crate::notifications::unread_count_inner(&state, authenticated).await
}

async fn mark_read_handler(
    AxumState(state): AxumState<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>> {
    crate::notifications::mark_read_inner(&state, authenticated, id).await
}

async fn mark_all_read_handler(
    AxumState(state): AxumState<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<Json<SuccessResponse>> {
    crate::notifications::mark_all_read_inner(&state, authenticated).await
}

async fn delete_notification_handler(
    AxumState(state): AxumState<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>> {
    crate::notifications::delete_notification_inner(&state, authenticated, id).await
}

/// Creates the health check router
pub fn create_health_router(state: AppState) -> Router {
    Router::new().route("/health", get(health_handler)).with_state(state)
}

async fn health_handler(AxumState(state): AxumState<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

/// Creates the main application router
///
/// # Arguments
///
/// * `state` - Application state containing the DB connection and mailer
/// * `enable_tls` - Emits HSTS headers when the server terminates TLS
pub fn create_app_router(state: AppState, enable_tls: bool) -> Router {
    Router::new()
        .merge(create_health_router(state.clone()))
        .merge(create_router(state))
        .layer(middleware::from_fn(move |req, next| {
            crate::middleware::security_headers::security_headers_middleware(req, next, enable_tls)
        }))
}
