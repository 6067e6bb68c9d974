//! # CLI Server
//!
//! Server startup and migration commands for the PortRay CLI.

use error::{AppError, Result};
use migration::{Migrator, MigratorTrait as _};
use sea_orm::Database;
// `::server` is the API crate; this module shares its name.
use ::server::{create_app_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{build_database_url, parse_socket_addr, DatabaseConfig};

/// Starts the API server.
///
/// Connects to the database, applies pending migrations, runs the seed
/// steps and serves the router until shutdown.
pub async fn serve(args: &crate::ServeArgs) -> Result<()> {
    info!(target: "serve", host = %args.host, port = %args.port, "Starting API server...");

    let db = connect_and_prepare().await?;
    let state = AppState::new(db);
    let app = create_app_router(state, args.tls);

    let address = parse_socket_addr(&args.host, args.port)
        .map_err(|e| AppError::config(format!("Invalid address {}:{}: {}", args.host, args.port, e)))?;

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", address, e)))?;

    info!(target: "serve", %address, "API server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Runs migrations and seeds, or rolls back the last migration.
pub async fn migrate(args: &crate::MigrateArgs) -> Result<()> {
    let database_url = build_database_url(&DatabaseConfig::from_env());
    let db = Database::connect(&database_url)
        .await
        .map_err(|e| AppError::database(format!("Failed to connect to database: {}", e)))?;

    if args.rollback {
        info!(target: "migrate", "Rolling back the last migration...");
        Migrator::down(&db, None)
            .await
            .map_err(|e| AppError::migration(format!("Rollback failed: {}", e)))?;
        info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    Migrator::up(&db, None)
        .await
        .map_err(|e| AppError::migration(format!("Migration failed: {}", e)))?;
    info!(target: "migrate", "Migrations completed successfully");

    migration::seeds::run_all_seeds(&db).await?;
    info!(target: "migrate", "Seed data completed successfully");

    Ok(())
}

/// Deletes expired session rows. There is no in-process timer for this;
/// it is meant to run from a scheduler.
pub async fn cleanup_sessions() -> Result<()> {
    let database_url = build_database_url(&DatabaseConfig::from_env());
    let db = Database::connect(&database_url)
        .await
        .map_err(|e| AppError::database(format!("Failed to connect to database: {}", e)))?;

    let reclaimed = ::server::sessions::cleanup_expired_sessions(&db).await?;
    info!(target: "cleanup", reclaimed, "Expired sessions deleted");

    Ok(())
}

/// Connects to the database, applies migrations and runs seeds.
async fn connect_and_prepare() -> Result<sea_orm::DbConn> {
    let db_config = DatabaseConfig::from_env();
    let database_url = build_database_url(&db_config);

    info!(target: "serve",
        host = %db_config.host,
        port = %db_config.port,
        database = %db_config.database,
        "Connecting to database..."
    );

    let db = Database::connect(&database_url)
        .await
        .map_err(|e| AppError::database(format!("Failed to connect to database: {}", e)))?;

    info!(target: "serve", "Running database migrations...");
    Migrator::up(&db, None)
        .await
        .map_err(|e| AppError::migration(format!("Migration failed: {}", e)))?;
    info!(target: "serve", "Database migrations completed successfully");

    migration::seeds::run_all_seeds(&db).await?;
    info!(target: "serve", "Seed data completed successfully");

    Ok(db)
}
