//! # PortRay Auth Primitives
//!
//! Password hashing/verification (Argon2id) and opaque bearer token
//! generation for the session and verification flows.

pub mod password;
pub mod token;

pub use password::{hash_password, validate_password_strength, verify_password, PasswordError};
pub use token::{digest_token, generate_token};
// Re-export so downstream crates share one secrecy version
pub use secrecy;
