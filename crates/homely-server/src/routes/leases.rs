// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lease HTTP handlers.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use chrono::NaiveDate;
use homely_server_auth::{LeaseId, UnitId, UserId};
use homely_server_db::Lease;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
	api::AppState,
	error::{ErrorResponse, ServerError},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateLeaseRequest {
	#[schema(value_type = String, format = Uuid)]
	pub tenant_id: UserId,
	pub rent_cents: i64,
	pub starts_on: NaiveDate,
	#[serde(default)]
	pub ends_on: Option<NaiveDate>,
}

impl CreateLeaseRequest {
	fn validate(&self) -> Result<(), ServerError> {
		if self.rent_cents < 0 {
			return Err(ServerError::BadRequest(
				"rent_cents must not be negative".to_string(),
			));
		}
		if self.ends_on.is_some_and(|end| end < self.starts_on) {
			return Err(ServerError::BadRequest(
				"ends_on must not be before starts_on".to_string(),
			));
		}
		Ok(())
	}
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListLeasesResponse {
	pub leases: Vec<Lease>,
}

#[utoipa::path(
    get,
    path = "/api/units/{id}/leases",
    params(("id" = String, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Leases on the unit", body = ListLeasesResponse),
        (status = 403, description = "Not the property's landlord", body = ErrorResponse),
        (status = 404, description = "Unit not found", body = ErrorResponse)
    ),
    tag = "leases"
)]
/// GET /api/units/{id}/leases
pub async fn list_leases(
	State(state): State<AppState>,
	Path(id): Path<UnitId>,
) -> Result<Json<ListLeasesResponse>, ServerError> {
	let leases = state.lease_repo.list_leases(&id).await?;
	Ok(Json(ListLeasesResponse { leases }))
}

#[utoipa::path(
    post,
    path = "/api/units/{id}/leases",
    params(("id" = String, Path, description = "Unit ID")),
    request_body = CreateLeaseRequest,
    responses(
        (status = 201, description = "Lease created", body = Lease),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Not the property's landlord", body = ErrorResponse),
        (status = 404, description = "Unit not found", body = ErrorResponse)
    ),
    tag = "leases"
)]
/// POST /api/units/{id}/leases
pub async fn create_lease(
	State(state): State<AppState>,
	Path(id): Path<UnitId>,
	Json(body): Json<CreateLeaseRequest>,
) -> Result<impl IntoResponse, ServerError> {
	body.validate()?;

	let lease = Lease::new(id, body.tenant_id, body.rent_cents, body.starts_on, body.ends_on);
	state.lease_repo.create_lease(&lease).await?;

	tracing::info!(lease_id = %lease.id, unit_id = %id, tenant_id = %lease.tenant_id, "lease created");
	Ok((StatusCode::CREATED, Json(lease)))
}

#[utoipa::path(
    get,
    path = "/api/leases/{id}",
    params(("id" = String, Path, description = "Lease ID")),
    responses(
        (status = 200, description = "Lease", body = Lease),
        (status = 403, description = "Not the property's landlord", body = ErrorResponse),
        (status = 404, description = "Lease not found", body = ErrorResponse)
    ),
    tag = "leases"
)]
/// GET /api/leases/{id}
pub async fn get_lease(
	State(state): State<AppState>,
	Path(id): Path<LeaseId>,
) -> Result<Json<Lease>, ServerError> {
	state
		.lease_repo
		.get_lease(&id)
		.await?
		.map(Json)
		.ok_or_else(|| ServerError::NotFound(format!("lease {id}")))
}
