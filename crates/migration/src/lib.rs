//! Database migrations for PortRay
//!
//! Creates the relational schema (users, sessions, organizations, ports,
//! contacts, terminals, logs, notifications, menus) and provides seed
//! routines for the subscription-type lookup and the initial admin account.

pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::MigratorTrait;

pub mod seeds;

mod m20260810_000001_create_users_table;
mod m20260810_000002_create_sessions_table;
mod m20260810_000003_create_organizations_table;
mod m20260810_000004_create_ports_table;
mod m20260810_000005_create_port_admin_contacts_table;
mod m20260810_000006_create_subscription_types_table;
mod m20260810_000007_create_terminals_table;
mod m20260810_000008_create_activation_logs_table;
mod m20260810_000009_create_audit_logs_table;
mod m20260810_000010_create_notifications_table;
mod m20260810_000011_create_menus_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_000001_create_users_table::Migration),
            Box::new(m20260810_000002_create_sessions_table::Migration),
            Box::new(m20260810_000003_create_organizations_table::Migration),
            Box::new(m20260810_000004_create_ports_table::Migration),
            Box::new(m20260810_000005_create_port_admin_contacts_table::Migration),
            Box::new(m20260810_000006_create_subscription_types_table::Migration),
            Box::new(m20260810_000007_create_terminals_table::Migration),
            Box::new(m20260810_000008_create_activation_logs_table::Migration),
            Box::new(m20260810_000009_create_audit_logs_table::Migration),
            Box::new(m20260810_000010_create_notifications_table::Migration),
            Box::new(m20260810_000011_create_menus_table::Migration),
        ]
    }
}
