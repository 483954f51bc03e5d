// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The Authorization Guard.
//!
//! A decision is two explicit parts composed per route:
//!
//! 1. [`role_allows`]: the principal's role grants the permission.
//! 2. [`owns`]: for ownership routes, the principal is the resource's owner
//!    or assignee, or is an admin.
//!
//! [`evaluate`] is the one call the route layer makes per request. It
//! separates "who are you" ([`AccessError::Unauthenticated`]) from "you may
//! not" ([`AccessError::Unauthorized`]). Nothing here performs I/O.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::instrument;

use crate::permission::{Permission, PermissionTable};
use crate::policy::RoutePolicy;
use crate::types::{Role, UserId};

/// The authenticated caller for the lifetime of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub id: UserId,
	/// `None` when the token carried a missing or unrecognized role. Such a
	/// principal is authenticated but denied every permission.
	pub role: Option<Role>,
}

impl Principal {
	pub fn new(id: UserId, role: Role) -> Self {
		Self {
			id,
			role: Some(role),
		}
	}

	pub fn without_role(id: UserId) -> Self {
		Self { id, role: None }
	}

	pub fn is_admin(&self) -> bool {
		self.role == Some(Role::Admin)
	}
}

/// Kinds of resources that carry an owner or assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
	Property,
	Unit,
	/// Owned by the landlord of the leased unit's property.
	Lease,
	MaintenanceRequest,
	/// A maintenance request viewed from the assigned workman's side.
	WorkOrder,
}

impl ResourceKind {
	pub const fn as_str(&self) -> &'static str {
		match self {
			ResourceKind::Property => "property",
			ResourceKind::Unit => "unit",
			ResourceKind::Lease => "lease",
			ResourceKind::MaintenanceRequest => "maintenance_request",
			ResourceKind::WorkOrder => "work_order",
		}
	}
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Ownership attributes of one resource instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAttrs {
	pub kind: ResourceKind,
	/// Owning landlord, or assigned workman for work orders.
	pub owner_user_id: Option<UserId>,
}

impl ResourceAttrs {
	pub fn new(kind: ResourceKind, owner_user_id: Option<UserId>) -> Self {
		Self {
			kind,
			owner_user_id,
		}
	}

	pub fn owned_by(kind: ResourceKind, owner: UserId) -> Self {
		Self::new(kind, Some(owner))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
	#[error("authentication required")]
	Unauthenticated,

	#[error("insufficient permissions")]
	Unauthorized,
}

/// Role half of the decision. A principal without a recognized role is
/// never allowed.
pub fn role_allows(principal: &Principal, permission: Permission) -> bool {
	principal
		.role
		.is_some_and(|role| PermissionTable::global().allows(role, permission))
}

/// Ownership half of the decision. An unowned resource (e.g. an unassigned
/// work order) is only reachable by admins.
pub fn owns(principal: &Principal, resource: &ResourceAttrs) -> bool {
	principal.is_admin() || resource.owner_user_id == Some(principal.id)
}

/// Decide whether `principal` may exercise `permission`, optionally on a
/// specific `resource`.
#[instrument(
	level = "debug",
	skip(principal, resource),
	fields(
		user_id = %principal.id,
		role = ?principal.role,
		permission = %permission,
		resource_kind = ?resource.map(|r| r.kind),
	),
	ret
)]
pub fn is_allowed(
	principal: &Principal,
	permission: Permission,
	resource: Option<&ResourceAttrs>,
) -> bool {
	let allowed = role_allows(principal, permission);
	match resource {
		Some(resource) => allowed && owns(principal, resource),
		None => allowed,
	}
}

/// Whether an ownership lookup could change the outcome of `policy`.
///
/// False for non-ownership policies and for principals whose role already
/// fails, so the route layer can skip the lookup.
pub fn needs_resource(principal: Option<&Principal>, policy: &RoutePolicy) -> bool {
	match (principal, policy) {
		(Some(principal), RoutePolicy::Owned { permission, .. }) => {
			role_allows(principal, *permission)
		}
		_ => false,
	}
}

/// The per-request decision for a route.
///
/// For [`RoutePolicy::Owned`], `resource` must be the looked-up attributes
/// of the target; passing `None` there denies.
pub fn evaluate(
	principal: Option<&Principal>,
	policy: &RoutePolicy,
	resource: Option<&ResourceAttrs>,
) -> Result<(), AccessError> {
	let allowed = match (policy, principal) {
		(RoutePolicy::Public, _) => true,
		(_, None) => return Err(AccessError::Unauthenticated),
		(RoutePolicy::Authenticated, Some(_)) => true,
		(RoutePolicy::Permission { permission }, Some(principal)) => {
			is_allowed(principal, *permission, None)
		}
		(
			RoutePolicy::Owned {
				permission,
				resource: kind,
			},
			Some(principal),
		) => match resource {
			Some(resource) if resource.kind == *kind => {
				is_allowed(principal, *permission, Some(resource))
			}
			_ => false,
		},
		(RoutePolicy::AdminOnly, Some(principal)) => principal.is_admin(),
	};

	if allowed {
		Ok(())
	} else {
		Err(AccessError::Unauthorized)
	}
}
