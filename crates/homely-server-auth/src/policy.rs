// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-route access policies.

use serde::Serialize;
use std::fmt;

use crate::guard::ResourceKind;
use crate::permission::Permission;

/// The single check a route runs before its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoutePolicy {
	/// No check at all.
	Public,
	/// A principal must exist; any role, or no recognized role, will do.
	Authenticated,
	/// Authenticated and the role grants `permission`.
	Permission { permission: Permission },
	/// Role grants `permission` and the principal owns the `{id}` resource.
	Owned {
		permission: Permission,
		resource: ResourceKind,
	},
	/// Authenticated with role admin.
	AdminOnly,
}

impl RoutePolicy {
	pub const fn permission_gated(permission: Permission) -> Self {
		RoutePolicy::Permission { permission }
	}

	pub const fn owned(permission: Permission, resource: ResourceKind) -> Self {
		RoutePolicy::Owned {
			permission,
			resource,
		}
	}

	pub fn requires_authentication(&self) -> bool {
		!matches!(self, RoutePolicy::Public)
	}

	pub fn permission(&self) -> Option<Permission> {
		match self {
			RoutePolicy::Permission { permission } | RoutePolicy::Owned { permission, .. } => {
				Some(*permission)
			}
			_ => None,
		}
	}

	/// The resource kind whose ownership this policy checks, if any.
	pub fn ownership(&self) -> Option<ResourceKind> {
		match self {
			RoutePolicy::Owned { resource, .. } => Some(*resource),
			_ => None,
		}
	}
}

impl fmt::Display for RoutePolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RoutePolicy::Public => f.write_str("public"),
			RoutePolicy::Authenticated => f.write_str("authenticated"),
			RoutePolicy::Permission { permission } => write!(f, "permission:{permission}"),
			RoutePolicy::Owned {
				permission,
				resource,
			} => write!(f, "owned:{permission}:{resource}"),
			RoutePolicy::AdminOnly => f.write_str("admin_only"),
		}
	}
}
