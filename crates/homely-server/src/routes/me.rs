// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The caller's own identity and effective permissions.

use axum::Json;
use homely_server_auth::{Permission, PermissionTable, Role, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{auth_middleware::RequireAuth, error::ErrorResponse};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
	#[schema(value_type = String, format = Uuid)]
	pub user_id: UserId,
	/// `null` when the token carried a role this server does not know.
	#[schema(value_type = Option<String>)]
	pub role: Option<Role>,
	#[schema(value_type = Vec<String>)]
	pub permissions: Vec<Permission>,
}

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current principal", body = MeResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "identity"
)]
/// GET /api/me
pub async fn get_me(RequireAuth(principal): RequireAuth) -> Json<MeResponse> {
	let permissions = principal
		.role
		.map(|role| PermissionTable::global().permissions_for(role))
		.unwrap_or_default();

	Json(MeResponse {
		user_id: principal.id,
		role: principal.role,
		permissions,
	})
}
