// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use homely_server_auth::AccessError;
use homely_server_db::DbError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("Database error: {0}")]
	Db(#[from] sqlx::Error),

	#[error("Database error: {0}")]
	DbError(String),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Invalid request: {0}")]
	BadRequest(String),

	#[error("Internal error: {0}")]
	Internal(String),

	/// No valid principal could be established.
	#[error("Unauthorized")]
	Unauthorized,

	/// Valid principal, but the guard denied the request.
	#[error("Forbidden")]
	Forbidden,
}

impl From<DbError> for ServerError {
	fn from(e: DbError) -> Self {
		match e {
			DbError::NotFound(what) => ServerError::NotFound(what),
			DbError::Conflict(what) => ServerError::Conflict(what),
			DbError::Sqlx(e) => ServerError::Db(e),
			DbError::Internal(msg) => ServerError::DbError(msg),
		}
	}
}

impl From<AccessError> for ServerError {
	fn from(e: AccessError) -> Self {
		match e {
			AccessError::Unauthenticated => ServerError::Unauthorized,
			AccessError::Unauthorized => ServerError::Forbidden,
		}
	}
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl ErrorResponse {
	pub fn new(error: &str, message: impl Into<String>) -> Self {
		Self {
			error: error.to_string(),
			message: message.into(),
		}
	}

	pub fn unauthorized() -> Self {
		Self::new("unauthorized", "Authentication required")
	}

	/// Never names the missing permission.
	pub fn forbidden() -> Self {
		Self::new("forbidden", "Insufficient permissions")
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, body) = match &self {
			ServerError::Db(e) => {
				tracing::error!(error = %e, "database error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("database_error", "A database error occurred"),
				)
			}
			ServerError::DbError(msg) => {
				tracing::error!(error = %msg, "database error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("database_error", "A database error occurred"),
				)
			}
			ServerError::NotFound(what) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new("not_found", format!("Not found: {what}")),
			),
			ServerError::Conflict(msg) => (
				StatusCode::CONFLICT,
				ErrorResponse::new("conflict", msg.clone()),
			),
			ServerError::BadRequest(msg) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("bad_request", msg.clone()),
			),
			ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("internal_error", "An internal error occurred"),
				)
			}
			ServerError::Unauthorized => (StatusCode::UNAUTHORIZED, ErrorResponse::unauthorized()),
			ServerError::Forbidden => (StatusCode::FORBIDDEN, ErrorResponse::forbidden()),
		};

		(status, Json(body)).into_response()
	}
}
