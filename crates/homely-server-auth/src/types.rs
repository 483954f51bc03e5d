// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions: ID newtypes and the closed [`Role`] enum.
//!
//! All ID types serialize transparently as UUID strings and convert to and
//! from [`uuid::Uuid`], so a [`PropertyId`] can never be passed where a
//! [`UserId`] is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			pub fn into_inner(self) -> Uuid {
				self.0
			}

			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user (tenant, landlord, workman or admin).");
define_id_type!(PropertyId, "Unique identifier for a property.");
define_id_type!(UnitId, "Unique identifier for a rentable unit within a property.");
define_id_type!(LeaseId, "Unique identifier for a tenant's lease on a unit.");
define_id_type!(
	MaintenanceRequestId,
	"Unique identifier for a maintenance request. Once assigned it doubles as the work order id."
);

// =============================================================================
// Role
// =============================================================================

/// The fixed category a user belongs to.
///
/// Adding a variant is a compile error in [`Role::grants`](crate::permission)
/// until the new role's permissions are spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	Tenant,
	Landlord,
	Workman,
	Admin,
}

impl Role {
	pub const fn all() -> [Role; 4] {
		[Role::Tenant, Role::Landlord, Role::Workman, Role::Admin]
	}

	pub const fn as_str(&self) -> &'static str {
		match self {
			Role::Tenant => "tenant",
			Role::Landlord => "landlord",
			Role::Workman => "workman",
			Role::Admin => "admin",
		}
	}

	/// Parse a role name as carried in tokens. Case-insensitive, surrounding
	/// whitespace ignored; anything unrecognized is `None`.
	pub fn parse(value: &str) -> Option<Role> {
		let value = value.trim();
		Role::all()
			.into_iter()
			.find(|role| role.as_str().eq_ignore_ascii_case(value))
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
