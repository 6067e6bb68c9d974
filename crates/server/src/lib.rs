//! # PortRay API Server
//!
//! Axum-based HTTP API server for PortRay, a multi-tenant administrative
//! application for maritime port organizations.
//!
//! ## Modules
//!
//! - [`auth`]: Authentication endpoints (login, logout, me, setup-password)
//! - [`sessions`]: Bearer-session store backing authentication
//! - [`verification`]: Contact verification token flow
//! - [`lifecycle`]: Terminal submission/activation state machine
//! - [`audit`]: Append-only activation and account audit logs
//! - [`notify`]: Best-effort notification side-channel
//! - [`dto`]: Request/response data transfer objects
//! - [`middleware`]: HTTP middleware (auth, security headers)
//! - [`router`]: API route configuration

use std::sync::Arc;

pub use error::{AppError, Result};

pub mod audit;
pub mod auth;
pub mod contacts;
pub mod dto;
pub mod lifecycle;
pub mod mailer;
pub mod menus;
pub mod middleware;
pub mod notifications;
pub mod notify;
pub mod organizations;
pub mod ports;
pub mod router;
pub mod sessions;
pub mod terminals;
pub mod verification;

pub use router::create_app_router;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:         sea_orm::DbConn,
    /// Outbound mail seam (verification emails); best-effort
    pub mailer:     Arc<dyn mailer::Mailer>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Creates application state with the default logging mailer.
    #[must_use]
    pub fn new(db: sea_orm::DbConn) -> Self {
        Self {
            db,
            mailer: Arc::new(mailer::LogMailer),
            start_time: std::time::Instant::now(),
        }
    }
}
