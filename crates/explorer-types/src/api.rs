//! API types for the intent explorer HTTP surface.
//!
//! Defines the error envelope returned by the explorer endpoints. The
//! shape distinguishes non-retryable outcomes ("no such intent",
//! incomplete upstream data) from transient upstream failures so callers
//! can decide whether to show a retry affordance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Error type/code.
	pub error: String,
	/// Human-readable description.
	pub message: String,
	/// Additional error context.
	pub details: Option<serde_json::Value>,
	/// Whether retrying the same request may succeed.
	pub retryable: bool,
}

/// Structured API error type with appropriate HTTP status mapping.
#[derive(Debug)]
pub enum APIError {
	/// The requested intent is unknown to the registry (404).
	NotFound { message: String },
	/// The registry record is incomplete and cannot be processed (422).
	UnprocessableEntity { error_type: String, message: String },
	/// An upstream gateway failed; the request may succeed on retry (502).
	BadGateway { message: String },
	/// Internal server error (500).
	InternalServerError { message: String },
}

impl APIError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			APIError::NotFound { .. } => 404,
			APIError::UnprocessableEntity { .. } => 422,
			APIError::BadGateway { .. } => 502,
			APIError::InternalServerError { .. } => 500,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		match self {
			APIError::NotFound { message } => ErrorResponse {
				error: "not_found".to_string(),
				message: message.clone(),
				details: None,
				retryable: false,
			},
			APIError::UnprocessableEntity {
				error_type,
				message,
			} => ErrorResponse {
				error: error_type.clone(),
				message: message.clone(),
				details: None,
				retryable: false,
			},
			APIError::BadGateway { message } => ErrorResponse {
				error: "upstream_unavailable".to_string(),
				message: message.clone(),
				details: None,
				retryable: true,
			},
			APIError::InternalServerError { message } => ErrorResponse {
				error: "internal_error".to_string(),
				message: message.clone(),
				details: None,
				retryable: false,
			},
		}
	}
}

impl fmt::Display for APIError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			APIError::NotFound { message } => write!(f, "Not Found: {}", message),
			APIError::UnprocessableEntity { message, .. } => {
				write!(f, "Unprocessable Entity: {}", message)
			}
			APIError::BadGateway { message } => write!(f, "Bad Gateway: {}", message),
			APIError::InternalServerError { message } => {
				write!(f, "Internal Server Error: {}", message)
			}
		}
	}
}

impl std::error::Error for APIError {}

impl axum::response::IntoResponse for APIError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = StatusCode::from_u16(self.status_code())
			.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		(status, Json(self.to_error_response())).into_response()
	}
}
