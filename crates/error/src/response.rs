//! # API Error Responses
//!
//! JSON error body and axum response conversion for [`AppError`].
//!
//! ## Response Format
//!
//! ```json
//! {
//!   "success": false,
//!   "code": "VALIDATION_ERROR",
//!   "message": "portName is required"
//! }
//! ```

use axum::{response::IntoResponse, response::Response, Json};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always false.
    pub success: bool,

    /// Machine-readable error code.
    pub code: String,

    /// Human-readable error message.
    pub message: String,
}

impl ErrorBody {
    /// Build the wire body for an application error.
    #[must_use]
    pub fn from_error(err: &AppError) -> Self {
        Self {
            success: false,
            code:    err.code().to_string(),
            message: err.message().to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // 5xx details stay in the logs, not on the wire
        let body = if status.is_server_error() {
            tracing::error!(code = self.code(), message = self.message(), "Request failed");
            ErrorBody {
                success: false,
                code:    self.code().to_string(),
                message: "Internal server error".to_string(),
            }
        }
        else {
            ErrorBody::from_error(&self)
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_from_error() {
        let err = AppError::validation("portName is required");
        let body = ErrorBody::from_error(&err);

        assert!(!body.success);
        assert_eq!(body.code, "VALIDATION_ERROR");
        assert_eq!(body.message, "portName is required");
    }

    #[test]
    fn test_error_body_serializes() {
        let body = ErrorBody {
            success: false,
            code:    "NOT_FOUND".to_string(),
            message: "Terminal not found".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("NOT_FOUND"));
    }

    #[test]
    fn test_internal_error_message_masked() {
        let err = AppError::database("connection refused to 10.0.0.1");
        let response = err.into_response();
        assert_eq!(response.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
