// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read-only admin views of the authorization model.
//!
//! Permission sets are fixed at deploy time; these endpoints only report them.

use std::sync::Arc;

use axum::{Extension, Json};
use homely_server_auth::{Permission, PermissionTable, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
	error::ErrorResponse,
	guarded_router::{RouteEntry, RouteTable},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RolePermissions {
	#[schema(value_type = String)]
	pub role: Role,
	#[schema(value_type = Vec<String>)]
	pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PermissionsResponse {
	pub roles: Vec<RolePermissions>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoutesResponse {
	#[schema(value_type = Vec<Object>)]
	pub routes: Vec<RouteEntry>,
}

#[utoipa::path(
    get,
    path = "/api/admin/permissions",
    responses(
        (status = 200, description = "Role/permission table", body = PermissionsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
/// GET /api/admin/permissions
pub async fn list_permissions() -> Json<PermissionsResponse> {
	let table = PermissionTable::global();
	let roles = Role::all()
		.into_iter()
		.map(|role| RolePermissions {
			role,
			permissions: table.permissions_for(role),
		})
		.collect();

	Json(PermissionsResponse { roles })
}

#[utoipa::path(
    get,
    path = "/api/admin/routes",
    responses(
        (status = 200, description = "Every route with its access policy", body = RoutesResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
/// GET /api/admin/routes
pub async fn list_routes(Extension(table): Extension<Arc<RouteTable>>) -> Json<RoutesResponse> {
	Json(RoutesResponse {
		routes: table.entries().to_vec(),
	})
}
