// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The static Role/Permission Table.
//!
//! Grants are written down once, as data, in [`Role::grants`] and compiled
//! into an immutable [`PermissionTable`] at first use. There is no way to edit
//! the table at runtime; changing a grant means changing this file and
//! redeploying.
//!
//! | Role     | Permissions |
//! |----------|-------------|
//! | tenant   | submit maintenance |
//! | landlord | manage properties, approve maintenance, assign work orders, complete work orders, submit maintenance |
//! | workman  | complete work orders |
//! | admin    | everything |

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use crate::types::Role;

/// A named capability that may be granted to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
	ManageProperties,
	SubmitMaintenance,
	ApproveMaintenance,
	AssignWorkOrders,
	CompleteWorkOrders,
}

impl Permission {
	pub const fn all() -> [Permission; 5] {
		[
			Permission::ManageProperties,
			Permission::SubmitMaintenance,
			Permission::ApproveMaintenance,
			Permission::AssignWorkOrders,
			Permission::CompleteWorkOrders,
		]
	}

	pub const fn as_str(&self) -> &'static str {
		match self {
			Permission::ManageProperties => "manage_properties",
			Permission::SubmitMaintenance => "submit_maintenance",
			Permission::ApproveMaintenance => "approve_maintenance",
			Permission::AssignWorkOrders => "assign_work_orders",
			Permission::CompleteWorkOrders => "complete_work_orders",
		}
	}

	/// Parse a permission name. Accepts the wire form (`manage_properties`)
	/// as well as spaced or hyphenated phrasing (`"manage properties"`),
	/// case-insensitively. Unknown names are `None`.
	pub fn parse(value: &str) -> Option<Permission> {
		let normalized: String = value
			.trim()
			.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
			.filter(|part| !part.is_empty())
			.collect::<Vec<_>>()
			.join("_")
			.to_ascii_lowercase();

		Permission::all()
			.into_iter()
			.find(|permission| permission.as_str() == normalized)
	}
}

impl fmt::Display for Permission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Role {
	/// The permissions this role is granted. Exhaustive, so a new
	/// role does not compile until its grants are listed here.
	pub fn grants(self) -> &'static [Permission] {
		match self {
			Role::Tenant => &[Permission::SubmitMaintenance],
			Role::Landlord => &[
				Permission::ManageProperties,
				Permission::ApproveMaintenance,
				Permission::AssignWorkOrders,
				Permission::CompleteWorkOrders,
				Permission::SubmitMaintenance,
			],
			Role::Workman => &[Permission::CompleteWorkOrders],
			Role::Admin => &ADMIN_GRANTS,
		}
	}
}

static ADMIN_GRANTS: [Permission; 5] = Permission::all();

static GLOBAL_TABLE: LazyLock<PermissionTable> = LazyLock::new(PermissionTable::build);

/// Immutable lookup from [`Role`] to its allowed [`Permission`]s.
#[derive(Debug, Clone)]
pub struct PermissionTable {
	grants: HashMap<Role, HashSet<Permission>>,
}

impl PermissionTable {
	/// Build the table from [`Role::grants`].
	pub fn build() -> Self {
		let grants = Role::all()
			.into_iter()
			.map(|role| (role, role.grants().iter().copied().collect()))
			.collect();
		Self { grants }
	}

	/// The process-wide table, built on first access.
	pub fn global() -> &'static PermissionTable {
		&GLOBAL_TABLE
	}

	/// Total: every (role, permission) pair has an answer.
	pub fn allows(&self, role: Role, permission: Permission) -> bool {
		self
			.grants
			.get(&role)
			.is_some_and(|set| set.contains(&permission))
	}

	/// String entry point for untyped callers. Unknown role or permission
	/// names fail closed.
	pub fn allows_named(&self, role: &str, permission: &str) -> bool {
		match (Role::parse(role), Permission::parse(permission)) {
			(Some(role), Some(permission)) => self.allows(role, permission),
			_ => false,
		}
	}

	/// The permissions granted to `role`, in declaration order.
	pub fn permissions_for(&self, role: Role) -> Vec<Permission> {
		Permission::all()
			.into_iter()
			.filter(|permission| self.allows(role, *permission))
			.collect()
	}
}

impl Default for PermissionTable {
	fn default() -> Self {
		Self::build()
	}
}
