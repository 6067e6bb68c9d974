//! # Data Transfer Objects
//!
//! Request and response types for the REST surface. Request bodies carry
//! `validator` rules; responses wrap their payload in a `success` envelope.

pub mod auth;
pub mod contacts;
pub mod menus;
pub mod notifications;
pub mod organizations;
pub mod ports;
pub mod terminals;

use serde::Serialize;

/// Generic success envelope around one payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataResponse<T> {
    /// Indicates operation success
    pub success: bool,

    /// The payload
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    /// Wraps a payload in a success envelope.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Generic success response without a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessResponse {
    /// Indicates operation success
    pub success: bool,

    /// Human-readable message
    pub message: String,
}

impl SuccessResponse {
    /// Creates a success response with a message.
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}
