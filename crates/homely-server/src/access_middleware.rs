// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-route policy enforcement.
//!
//! Each guarded route carries a [`RouteGate`] as middleware state. The gate
//! reads the [`AuthContext`] left by the authentication layer, looks up the
//! target resource when the policy is ownership-based, and runs the guard.
//! Denials never reach the handler.

use axum::{
	body::Body,
	extract::{FromRequestParts, Path, State},
	http::{request::Parts, Request},
	middleware::Next,
	response::{IntoResponse, Response},
};
use homely_server_auth::{
	evaluate, needs_resource, AccessError, AuthContext, OwnershipResolver, ResourceAttrs,
	ResourceKind, RoutePolicy,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::{error::ServerError, guarded_router::Verb};

/// Path parameter holding the target resource id on ownership routes.
pub const RESOURCE_ID_PARAM: &str = "id";

#[derive(Clone)]
pub struct RouteGate {
	pub method: Verb,
	pub path: &'static str,
	pub policy: RoutePolicy,
	resolver: Arc<dyn OwnershipResolver>,
}

impl RouteGate {
	pub fn new(
		method: Verb,
		path: &'static str,
		policy: RoutePolicy,
		resolver: Arc<dyn OwnershipResolver>,
	) -> Self {
		Self {
			method,
			path,
			policy,
			resolver,
		}
	}
}

#[instrument(
	name = "route_gate",
	skip_all,
	fields(
		method = %gate.method,
		route = gate.path,
		policy = %gate.policy,
		user_id = tracing::field::Empty,
	)
)]
pub async fn enforce_route_policy(
	gate: State<RouteGate>,
	request: Request<Body>,
	next: Next,
) -> Response {
	let State(gate) = gate;
	let (mut parts, body) = request.into_parts();

	let auth_ctx = parts
		.extensions
		.get::<AuthContext>()
		.copied()
		.unwrap_or_default();
	let principal = auth_ctx.principal();
	if let Some(principal) = principal {
		tracing::Span::current().record("user_id", tracing::field::display(&principal.id));
	}

	let resource = match gate.policy.ownership() {
		Some(kind) if needs_resource(principal, &gate.policy) => {
			match lookup_resource(&gate, kind, &mut parts).await {
				Ok(attrs) => Some(attrs),
				Err(response) => return response,
			}
		}
		_ => None,
	};

	match evaluate(principal, &gate.policy, resource.as_ref()) {
		Ok(()) => {
			tracing::debug!("access granted");
			next.run(Request::from_parts(parts, body)).await
		}
		Err(AccessError::Unauthenticated) => {
			tracing::info!("access denied: authentication required");
			ServerError::Unauthorized.into_response()
		}
		Err(AccessError::Unauthorized) => {
			tracing::info!(
				role = ?principal.and_then(|p| p.role),
				"access denied: insufficient permissions"
			);
			ServerError::Forbidden.into_response()
		}
	}
}

async fn lookup_resource(
	gate: &RouteGate,
	kind: ResourceKind,
	parts: &mut Parts,
) -> Result<ResourceAttrs, Response> {
	let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, &())
		.await
		.map_err(|e| {
			ServerError::Internal(format!("route {} has no path parameters: {e}", gate.path))
				.into_response()
		})?;

	let raw = params.get(RESOURCE_ID_PARAM).ok_or_else(|| {
		ServerError::Internal(format!(
			"route {} is missing the {{{RESOURCE_ID_PARAM}}} parameter",
			gate.path
		))
		.into_response()
	})?;

	let id = Uuid::parse_str(raw)
		.map_err(|_| ServerError::BadRequest(format!("invalid {kind} id")).into_response())?;

	match gate.resolver.resolve(kind, id).await {
		Ok(Some(attrs)) => Ok(attrs),
		Ok(None) => Err(ServerError::NotFound(format!("{kind} not found")).into_response()),
		Err(e) => Err(ServerError::Internal(format!("ownership lookup failed: {e}")).into_response()),
	}
}
