// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::{Path, State},
	Json,
};
use homely_server_auth::UnitId;
use homely_server_db::Unit;

use crate::{
	api::AppState,
	error::{ErrorResponse, ServerError},
};

#[utoipa::path(
    get,
    path = "/api/units/{id}",
    params(("id" = String, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Unit", body = Unit),
        (status = 403, description = "Not the property's landlord", body = ErrorResponse),
        (status = 404, description = "Unit not found", body = ErrorResponse)
    ),
    tag = "units"
)]
/// GET /api/units/{id}
pub async fn get_unit(
	State(state): State<AppState>,
	Path(id): Path<UnitId>,
) -> Result<Json<Unit>, ServerError> {
	state
		.property_repo
		.get_unit(&id)
		.await?
		.map(Json)
		.ok_or_else(|| ServerError::NotFound(format!("unit {id}")))
}
