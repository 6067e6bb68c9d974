//! Standalone migration runner.
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p migration -- up
//! ```

#[tokio::main]
async fn main() {
    sea_orm_migration::cli::run_cli(migration::Migrator).await;
}
