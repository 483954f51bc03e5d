// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Property and unit HTTP handlers.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use homely_server_auth::PropertyId;
use homely_server_db::{Property, Unit};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::{ErrorResponse, ServerError},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PropertyRequest {
	pub name: String,
	pub address: String,
}

impl PropertyRequest {
	fn validate(&self) -> Result<(), ServerError> {
		if self.name.trim().is_empty() {
			return Err(ServerError::BadRequest("name must not be empty".to_string()));
		}
		if self.address.trim().is_empty() {
			return Err(ServerError::BadRequest(
				"address must not be empty".to_string(),
			));
		}
		Ok(())
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUnitRequest {
	pub label: String,
	#[serde(default)]
	pub bedrooms: u32,
	#[serde(default)]
	pub rent_cents: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListPropertiesResponse {
	pub properties: Vec<Property>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListUnitsResponse {
	pub units: Vec<Unit>,
}

#[utoipa::path(
    get,
    path = "/api/properties",
    responses(
        (status = 200, description = "Properties visible to the caller", body = ListPropertiesResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Role cannot manage properties", body = ErrorResponse)
    ),
    tag = "properties"
)]
/// GET /api/properties - admins see every property, landlords their own.
pub async fn list_properties(
	State(state): State<AppState>,
	RequireAuth(principal): RequireAuth,
) -> Result<Json<ListPropertiesResponse>, ServerError> {
	let landlord = (!principal.is_admin()).then_some(&principal.id);
	let properties = state.property_repo.list_properties(landlord).await?;
	Ok(Json(ListPropertiesResponse { properties }))
}

#[utoipa::path(
    post,
    path = "/api/properties",
    request_body = PropertyRequest,
    responses(
        (status = 201, description = "Property created", body = Property),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Role cannot manage properties", body = ErrorResponse)
    ),
    tag = "properties"
)]
/// POST /api/properties - the caller becomes the landlord.
pub async fn create_property(
	State(state): State<AppState>,
	RequireAuth(principal): RequireAuth,
	Json(body): Json<PropertyRequest>,
) -> Result<impl IntoResponse, ServerError> {
	body.validate()?;

	let property = Property::new(principal.id, body.name.trim(), body.address.trim());
	state.property_repo.create_property(&property).await?;

	tracing::info!(property_id = %property.id, landlord_id = %principal.id, "property created");
	Ok((StatusCode::CREATED, Json(property)))
}

#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    params(("id" = String, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property", body = Property),
        (status = 403, description = "Not the property's landlord", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse)
    ),
    tag = "properties"
)]
/// GET /api/properties/{id}
pub async fn get_property(
	State(state): State<AppState>,
	Path(id): Path<PropertyId>,
) -> Result<Json<Property>, ServerError> {
	state
		.property_repo
		.get_property(&id)
		.await?
		.map(Json)
		.ok_or_else(|| ServerError::NotFound(format!("property {id}")))
}

#[utoipa::path(
    put,
    path = "/api/properties/{id}",
    params(("id" = String, Path, description = "Property ID")),
    request_body = PropertyRequest,
    responses(
        (status = 200, description = "Property updated", body = Property),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Not the property's landlord", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse)
    ),
    tag = "properties"
)]
/// PUT /api/properties/{id}
pub async fn update_property(
	State(state): State<AppState>,
	Path(id): Path<PropertyId>,
	Json(body): Json<PropertyRequest>,
) -> Result<Json<Property>, ServerError> {
	body.validate()?;

	state
		.property_repo
		.update_property(&id, body.name.trim(), body.address.trim())
		.await?
		.map(Json)
		.ok_or_else(|| ServerError::NotFound(format!("property {id}")))
}

#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    params(("id" = String, Path, description = "Property ID")),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 403, description = "Not the property's landlord", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse)
    ),
    tag = "properties"
)]
/// DELETE /api/properties/{id} - units and requests go with it.
pub async fn delete_property(
	State(state): State<AppState>,
	Path(id): Path<PropertyId>,
) -> Result<StatusCode, ServerError> {
	if state.property_repo.delete_property(&id).await? {
		tracing::info!(property_id = %id, "property deleted");
		Ok(StatusCode::NO_CONTENT)
	} else {
		Err(ServerError::NotFound(format!("property {id}")))
	}
}

#[utoipa::path(
    get,
    path = "/api/properties/{id}/units",
    params(("id" = String, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Units of the property", body = ListUnitsResponse),
        (status = 403, description = "Not the property's landlord", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse)
    ),
    tag = "units"
)]
/// GET /api/properties/{id}/units
pub async fn list_units(
	State(state): State<AppState>,
	Path(id): Path<PropertyId>,
) -> Result<Json<ListUnitsResponse>, ServerError> {
	let units = state.property_repo.list_units(&id).await?;
	Ok(Json(ListUnitsResponse { units }))
}

#[utoipa::path(
    post,
    path = "/api/properties/{id}/units",
    params(("id" = String, Path, description = "Property ID")),
    request_body = CreateUnitRequest,
    responses(
        (status = 201, description = "Unit created", body = Unit),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Not the property's landlord", body = ErrorResponse),
        (status = 409, description = "Label already used in this property", body = ErrorResponse)
    ),
    tag = "units"
)]
/// POST /api/properties/{id}/units
pub async fn create_unit(
	State(state): State<AppState>,
	Path(id): Path<PropertyId>,
	Json(body): Json<CreateUnitRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let label = body.label.trim();
	if label.is_empty() {
		return Err(ServerError::BadRequest("label must not be empty".to_string()));
	}
	if body.rent_cents < 0 {
		return Err(ServerError::BadRequest(
			"rent_cents must not be negative".to_string(),
		));
	}

	let unit = Unit::new(id, label, body.bedrooms, body.rent_cents);
	state.property_repo.create_unit(&unit).await?;

	tracing::info!(unit_id = %unit.id, property_id = %id, "unit created");
	Ok((StatusCode::CREATED, Json(unit)))
}
