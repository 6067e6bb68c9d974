//! # Authentication Endpoints
//!
//! Login, logout, session introspection and password setup.

pub mod handlers;
