// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The route layer: every endpoint is registered together with exactly one
//! [`RoutePolicy`], and the resulting table is kept for introspection.
//!
//! ```ignore
//! GuardedRouter::new(resolver)
//!     .route(Verb::Get, "/api/me", me, RoutePolicy::Authenticated)
//!     .route(
//!         Verb::Delete,
//!         "/api/properties/{id}",
//!         delete_property,
//!         RoutePolicy::owned(Permission::ManageProperties, ResourceKind::Property),
//!     )
//!     .build();
//! ```

use axum::{
	handler::Handler,
	middleware::from_fn_with_state,
	routing::{on, MethodFilter, MethodRouter},
	Router,
};
use homely_server_auth::{OwnershipResolver, RoutePolicy};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::{
	access_middleware::{enforce_route_policy, RouteGate},
	api::AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
	Get,
	Post,
	Put,
	Delete,
}

impl Verb {
	pub const fn as_str(&self) -> &'static str {
		match self {
			Verb::Get => "GET",
			Verb::Post => "POST",
			Verb::Put => "PUT",
			Verb::Delete => "DELETE",
		}
	}

	fn filter(self) -> MethodFilter {
		match self {
			Verb::Get => MethodFilter::GET,
			Verb::Post => MethodFilter::POST,
			Verb::Put => MethodFilter::PUT,
			Verb::Delete => MethodFilter::DELETE,
		}
	}
}

impl fmt::Display for Verb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One registered endpoint and its policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
	pub method: Verb,
	pub path: &'static str,
	pub policy: RoutePolicy,
}

/// Read-only view of every guarded endpoint, in registration order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
	entries: Vec<RouteEntry>,
}

impl RouteTable {
	pub fn entries(&self) -> &[RouteEntry] {
		&self.entries
	}

	pub fn policy_for(&self, method: Verb, path: &str) -> Option<RoutePolicy> {
		self
			.entries
			.iter()
			.find(|entry| entry.method == method && entry.path == path)
			.map(|entry| entry.policy)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

pub struct GuardedRouter {
	resolver: Arc<dyn OwnershipResolver>,
	routes: BTreeMap<&'static str, MethodRouter<AppState>>,
	table: RouteTable,
}

impl GuardedRouter {
	pub fn new(resolver: Arc<dyn OwnershipResolver>) -> Self {
		Self {
			resolver,
			routes: BTreeMap::new(),
			table: RouteTable::default(),
		}
	}

	/// Register `handler` for `verb path`, gated by `policy`.
	///
	/// # Panics
	/// If the same verb and path are registered twice.
	pub fn route<H, T>(mut self, verb: Verb, path: &'static str, handler: H, policy: RoutePolicy) -> Self
	where
		H: Handler<T, AppState>,
		T: 'static,
	{
		let gate = RouteGate::new(verb, path, policy, Arc::clone(&self.resolver));
		let endpoint =
			on(verb.filter(), handler).route_layer(from_fn_with_state(gate, enforce_route_policy));

		let merged = match self.routes.remove(path) {
			Some(existing) => existing.merge(endpoint),
			None => endpoint,
		};
		self.routes.insert(path, merged);
		self.table.entries.push(RouteEntry {
			method: verb,
			path,
			policy,
		});
		self
	}

	pub fn build(self) -> (Router<AppState>, RouteTable) {
		let router = self
			.routes
			.into_iter()
			.fold(Router::new(), |router, (path, method_router)| {
				router.route(path, method_router)
			});
		(router, self.table)
	}
}
