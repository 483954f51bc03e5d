// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router assembly.

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Extension, Router};
use homely_server_auth::{OwnershipResolver, Permission, ResourceKind, RoutePolicy, TokenVerifier};
use homely_server_config::ServerConfig;
use homely_server_db::{
	LeaseRepository, MaintenanceRepository, PropertyRepository, SqlOwnershipResolver,
};
use sqlx::SqlitePool;

use crate::{
	auth_middleware::auth_layer,
	guarded_router::{GuardedRouter, RouteTable, Verb},
	routes,
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub property_repo: Arc<PropertyRepository>,
	pub lease_repo: Arc<LeaseRepository>,
	pub maintenance_repo: Arc<MaintenanceRepository>,
	pub ownership: Arc<dyn OwnershipResolver>,
	pub token_verifier: Arc<TokenVerifier>,
	pub base_url: String,
}

pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	AppState {
		property_repo: Arc::new(PropertyRepository::new(pool.clone())),
		lease_repo: Arc::new(LeaseRepository::new(pool.clone())),
		maintenance_repo: Arc::new(MaintenanceRepository::new(pool.clone())),
		ownership: Arc::new(SqlOwnershipResolver::new(pool.clone())),
		token_verifier: Arc::new(TokenVerifier::new(
			&config.auth.jwt_secret,
			&config.auth.jwt_issuer,
		)),
		base_url: config.http.base_url.clone(),
		pool,
	}
}

/// Every endpoint with its policy. Order here is the order of `/api/admin/routes`.
pub fn guarded_routes(resolver: Arc<dyn OwnershipResolver>) -> GuardedRouter {
	let manage = Permission::ManageProperties;
	let owned_property = RoutePolicy::owned(manage, ResourceKind::Property);

	GuardedRouter::new(resolver)
		// Public
		.route(Verb::Get, "/health", routes::health::health_check, RoutePolicy::Public)
		.route(
			Verb::Get,
			"/api/openapi.json",
			routes::docs::openapi_json,
			RoutePolicy::Public,
		)
		// Identity
		.route(Verb::Get, "/api/me", routes::me::get_me, RoutePolicy::Authenticated)
		// Properties and units
		.route(
			Verb::Get,
			"/api/properties",
			routes::properties::list_properties,
			RoutePolicy::permission_gated(manage),
		)
		.route(
			Verb::Post,
			"/api/properties",
			routes::properties::create_property,
			RoutePolicy::permission_gated(manage),
		)
		.route(
			Verb::Get,
			"/api/properties/{id}",
			routes::properties::get_property,
			owned_property,
		)
		.route(
			Verb::Put,
			"/api/properties/{id}",
			routes::properties::update_property,
			owned_property,
		)
		.route(
			Verb::Delete,
			"/api/properties/{id}",
			routes::properties::delete_property,
			owned_property,
		)
		.route(
			Verb::Get,
			"/api/properties/{id}/units",
			routes::properties::list_units,
			owned_property,
		)
		.route(
			Verb::Post,
			"/api/properties/{id}/units",
			routes::properties::create_unit,
			owned_property,
		)
		.route(
			Verb::Get,
			"/api/units/{id}",
			routes::units::get_unit,
			RoutePolicy::owned(manage, ResourceKind::Unit),
		)
		// Leases
		.route(
			Verb::Get,
			"/api/units/{id}/leases",
			routes::leases::list_leases,
			RoutePolicy::owned(manage, ResourceKind::Unit),
		)
		.route(
			Verb::Post,
			"/api/units/{id}/leases",
			routes::leases::create_lease,
			RoutePolicy::owned(manage, ResourceKind::Unit),
		)
		.route(
			Verb::Get,
			"/api/leases/{id}",
			routes::leases::get_lease,
			RoutePolicy::owned(manage, ResourceKind::Lease),
		)
		// Maintenance
		.route(
			Verb::Get,
			"/api/maintenance-requests",
			routes::maintenance::list_requests,
			RoutePolicy::Authenticated,
		)
		.route(
			Verb::Post,
			"/api/maintenance-requests",
			routes::maintenance::create_request,
			RoutePolicy::permission_gated(Permission::SubmitMaintenance),
		)
		.route(
			Verb::Post,
			"/api/maintenance-requests/{id}/approve",
			routes::maintenance::approve_request,
			RoutePolicy::owned(
				Permission::ApproveMaintenance,
				ResourceKind::MaintenanceRequest,
			),
		)
		.route(
			Verb::Post,
			"/api/maintenance-requests/{id}/assign",
			routes::maintenance::assign_request,
			RoutePolicy::owned(
				Permission::AssignWorkOrders,
				ResourceKind::MaintenanceRequest,
			),
		)
		.route(
			Verb::Post,
			"/api/maintenance-requests/{id}/complete",
			routes::maintenance::complete_request,
			RoutePolicy::owned(Permission::CompleteWorkOrders, ResourceKind::WorkOrder),
		)
		// Admin
		.route(
			Verb::Get,
			"/api/admin/permissions",
			routes::admin::list_permissions,
			RoutePolicy::AdminOnly,
		)
		.route(
			Verb::Get,
			"/api/admin/routes",
			routes::admin::list_routes,
			RoutePolicy::AdminOnly,
		)
}

pub fn create_router(state: AppState) -> Router {
	let (router, table) = guarded_routes(Arc::clone(&state.ownership)).build();
	tracing::debug!(routes = table.len(), "route table built");

	router
		.layer(Extension(Arc::new(table)))
		.layer(from_fn_with_state(state.clone(), auth_layer))
		.with_state(state)
}

/// The route table alone, without building handlers into a router.
pub fn route_table(resolver: Arc<dyn OwnershipResolver>) -> RouteTable {
	guarded_routes(resolver).build().1
}
