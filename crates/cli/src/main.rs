//! # PortRay CLI
//!
//! Command-line interface for the PortRay API server.
//!
//! ## Usage
//!
//! ```bash
//! portray serve    # Start the API server (runs migrations automatically)
//! portray migrate  # Run database migrations and seeds
//! portray --help   # Show help
//! ```

use clap::{Args, CommandFactory as _, Parser, Subcommand};
use error::Result;

mod config;
mod server;

/// PortRay - multi-tenant port administration API
#[derive(Parser, Debug)]
#[command(name = "portray")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "PORTRAY_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server
    Serve(ServeArgs),

    /// Run database migrations and seeds
    Migrate(MigrateArgs),

    /// Delete expired session rows
    Cleanup,

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Verify configuration
    Validate,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "PORTRAY_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port to bind to
    #[arg(short, long, env = "PORTRAY_PORT", default_value = "3000")]
    port: u16,

    /// Server sits behind a TLS-terminating proxy; emit HSTS headers
    #[arg(long, env = "PORTRAY_TLS")]
    tls: bool,
}

#[derive(Args, Debug)]
struct MigrateArgs {
    /// Rollback the last migration instead of applying
    #[arg(long)]
    rollback: bool,
}

#[derive(Args, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level, &cli.log_format, None)
        .map_err(|e| error::AppError::config(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!(target: "app", command = ?cli.command, "PortRay CLI starting...");

    match cli.command {
        Commands::Serve(args) => server::serve(&args).await?,
        Commands::Migrate(args) => server::migrate(&args).await?,
        Commands::Cleanup => server::cleanup_sessions().await?,
        Commands::Completions(args) => completions(&args),
        Commands::Validate => validate()?,
    }

    Ok(())
}

fn completions(args: &CompletionsArgs) {
    clap_complete::generate(args.shell, &mut Cli::command(), "portray", &mut std::io::stdout());
}

/// Checks the environment without touching the database.
fn validate() -> Result<()> {
    tracing::info!(target: "validate", "Validating configuration...");

    let db_config = config::DatabaseConfig::from_env();
    tracing::info!(target: "validate",
        host = %db_config.host,
        port = %db_config.port,
        database = %db_config.database,
        "Database configuration loaded"
    );

    let admin_email = std::env::var("PORTRAY_ADMIN_EMAIL").ok();
    let admin_password = std::env::var("PORTRAY_ADMIN_PASSWORD").ok();
    match (admin_email, admin_password) {
        (Some(_), None) | (None, Some(_)) => {
            return Err(error::AppError::config(
                "PORTRAY_ADMIN_EMAIL and PORTRAY_ADMIN_PASSWORD must be set together",
            ));
        },
        (Some(_), Some(_)) => {
            tracing::info!(target: "validate", "Admin seed credentials are configured");
        },
        (None, None) => {
            tracing::warn!(target: "validate", "Admin seed credentials are not configured; no initial admin will be provisioned");
        },
    }

    tracing::info!(target: "validate", "Configuration is valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["portray", "serve", "--host", "127.0.0.1", "--port", "8080"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host, "127.0.0.1");
                assert_eq!(args.port, 8080);
                assert!(!args.tls);
            },
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["portray", "validate"]);
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.log_format, "pretty");
    }

    #[test]
    fn test_migrate_rollback() {
        let cli = Cli::parse_from(["portray", "migrate", "--rollback"]);
        match cli.command {
            Commands::Migrate(args) => assert!(args.rollback),
            _ => panic!("Expected Migrate command"),
        }
    }

    #[test]
    fn test_cli_command_factory() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "portray");
    }
}
