//! Entity definitions for PortRay
//!
//! This crate contains Sea-ORM entity definitions for the database models:
//! organizations own ports, ports own terminals and admin contacts, and
//! users/sessions carry the authentication state.

pub mod activation_logs;
pub use activation_logs::Entity as ActivationLogs;
pub mod audit_logs;
pub use audit_logs::Entity as AuditLogs;
pub mod menus;
pub use menus::Entity as Menus;
pub mod notifications;
pub use notifications::Entity as Notifications;
pub mod organizations;
pub use organizations::Entity as Organizations;
pub mod port_admin_contacts;
pub use port_admin_contacts::Entity as PortAdminContacts;
pub mod ports;
pub use ports::Entity as Ports;
pub mod sessions;
pub use sessions::Entity as Sessions;
pub mod subscription_types;
pub use subscription_types::Entity as SubscriptionTypes;
pub mod terminals;
pub use terminals::Entity as Terminals;
pub mod users;
pub use users::Entity as Users;
