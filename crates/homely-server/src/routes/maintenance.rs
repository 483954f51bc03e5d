// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Maintenance request and work order HTTP handlers.
//!
//! Status moves strictly `pending -> approved -> assigned -> completed`; any
//! other transition is a 409.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use homely_server_auth::{MaintenanceRequestId, Principal, PropertyId, Role, UnitId, UserId};
use homely_server_db::{MaintenanceRequest, RequestScope};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::{ErrorResponse, ServerError},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMaintenanceRequest {
	#[schema(value_type = String, format = Uuid)]
	pub property_id: PropertyId,
	#[serde(default)]
	#[schema(value_type = Option<String>, format = Uuid)]
	pub unit_id: Option<UnitId>,
	pub title: String,
	#[serde(default)]
	pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignRequest {
	#[schema(value_type = String, format = Uuid)]
	pub workman_id: UserId,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListMaintenanceResponse {
	pub requests: Vec<MaintenanceRequest>,
}

/// Which rows a caller sees in the list. This is query scoping, not an
/// access decision: the list route only requires authentication.
pub fn scope_for(principal: &Principal) -> RequestScope {
	match principal.role {
		Some(Role::Admin) => RequestScope::All,
		Some(Role::Landlord) => RequestScope::Landlord(principal.id),
		Some(Role::Workman) => RequestScope::AssignedTo(principal.id),
		Some(Role::Tenant) | None => RequestScope::SubmittedBy(principal.id),
	}
}

#[utoipa::path(
    get,
    path = "/api/maintenance-requests",
    responses(
        (status = 200, description = "Requests visible to the caller", body = ListMaintenanceResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "maintenance"
)]
/// GET /api/maintenance-requests
pub async fn list_requests(
	State(state): State<AppState>,
	RequireAuth(principal): RequireAuth,
) -> Result<Json<ListMaintenanceResponse>, ServerError> {
	let requests = state
		.maintenance_repo
		.list_requests(scope_for(&principal))
		.await?;
	Ok(Json(ListMaintenanceResponse { requests }))
}

#[utoipa::path(
    post,
    path = "/api/maintenance-requests",
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 201, description = "Request submitted", body = MaintenanceRequest),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Role cannot submit maintenance", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse)
    ),
    tag = "maintenance"
)]
/// POST /api/maintenance-requests
pub async fn create_request(
	State(state): State<AppState>,
	RequireAuth(principal): RequireAuth,
	Json(body): Json<CreateMaintenanceRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let title = body.title.trim();
	if title.is_empty() {
		return Err(ServerError::BadRequest("title must not be empty".to_string()));
	}

	if state
		.property_repo
		.get_property(&body.property_id)
		.await?
		.is_none()
	{
		return Err(ServerError::NotFound(format!(
			"property {}",
			body.property_id
		)));
	}

	if let Some(unit_id) = body.unit_id {
		let belongs = state
			.property_repo
			.get_unit(&unit_id)
			.await?
			.is_some_and(|unit| unit.property_id == body.property_id);
		if !belongs {
			return Err(ServerError::BadRequest(format!(
				"unit {unit_id} is not part of property {}",
				body.property_id
			)));
		}
	}

	let request = MaintenanceRequest::new(
		body.property_id,
		body.unit_id,
		principal.id,
		title,
		body.description.trim(),
	);
	state.maintenance_repo.create_request(&request).await?;

	tracing::info!(
		request_id = %request.id,
		property_id = %request.property_id,
		submitted_by = %principal.id,
		"maintenance request submitted"
	);
	Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    post,
    path = "/api/maintenance-requests/{id}/approve",
    params(("id" = String, Path, description = "Maintenance request ID")),
    responses(
        (status = 200, description = "Request approved", body = MaintenanceRequest),
        (status = 403, description = "Not the property's landlord", body = ErrorResponse),
        (status = 404, description = "Request not found", body = ErrorResponse),
        (status = 409, description = "Request is not pending", body = ErrorResponse)
    ),
    tag = "maintenance"
)]
/// POST /api/maintenance-requests/{id}/approve
pub async fn approve_request(
	State(state): State<AppState>,
	Path(id): Path<MaintenanceRequestId>,
) -> Result<Json<MaintenanceRequest>, ServerError> {
	let request = state.maintenance_repo.approve(&id).await?;
	tracing::info!(request_id = %id, "maintenance request approved");
	Ok(Json(request))
}

#[utoipa::path(
    post,
    path = "/api/maintenance-requests/{id}/assign",
    params(("id" = String, Path, description = "Maintenance request ID")),
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Work order assigned", body = MaintenanceRequest),
        (status = 403, description = "Not the property's landlord", body = ErrorResponse),
        (status = 404, description = "Request not found", body = ErrorResponse),
        (status = 409, description = "Request is not approved", body = ErrorResponse)
    ),
    tag = "maintenance"
)]
/// POST /api/maintenance-requests/{id}/assign
///
/// The workman id is recorded as given; this service keeps no user directory.
pub async fn assign_request(
	State(state): State<AppState>,
	Path(id): Path<MaintenanceRequestId>,
	Json(body): Json<AssignRequest>,
) -> Result<Json<MaintenanceRequest>, ServerError> {
	let request = state.maintenance_repo.assign(&id, &body.workman_id).await?;
	tracing::info!(request_id = %id, workman_id = %body.workman_id, "work order assigned");
	Ok(Json(request))
}

#[utoipa::path(
    post,
    path = "/api/maintenance-requests/{id}/complete",
    params(("id" = String, Path, description = "Maintenance request ID")),
    responses(
        (status = 200, description = "Work order completed", body = MaintenanceRequest),
        (status = 403, description = "Not the assigned workman", body = ErrorResponse),
        (status = 404, description = "Request not found", body = ErrorResponse),
        (status = 409, description = "Request is not assigned", body = ErrorResponse)
    ),
    tag = "maintenance"
)]
/// POST /api/maintenance-requests/{id}/complete
pub async fn complete_request(
	State(state): State<AppState>,
	Path(id): Path<MaintenanceRequestId>,
) -> Result<Json<MaintenanceRequest>, ServerError> {
	let request = state.maintenance_repo.complete(&id).await?;
	tracing::info!(request_id = %id, "work order completed");
	Ok(Json(request))
}
