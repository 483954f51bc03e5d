// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persisted domain records.

use chrono::{DateTime, NaiveDate, Utc};
use homely_server_auth::{LeaseId, MaintenanceRequestId, PropertyId, UnitId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Property {
	#[schema(value_type = String, format = Uuid)]
	pub id: PropertyId,
	#[schema(value_type = String, format = Uuid)]
	pub landlord_id: UserId,
	pub name: String,
	pub address: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Property {
	pub fn new(landlord_id: UserId, name: impl Into<String>, address: impl Into<String>) -> Self {
		let now = Utc::now();
		Self {
			id: PropertyId::generate(),
			landlord_id,
			name: name.into(),
			address: address.into(),
			created_at: now,
			updated_at: now,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Unit {
	#[schema(value_type = String, format = Uuid)]
	pub id: UnitId,
	#[schema(value_type = String, format = Uuid)]
	pub property_id: PropertyId,
	pub label: String,
	pub bedrooms: u32,
	/// Monthly rent in the smallest currency unit.
	pub rent_cents: i64,
	pub created_at: DateTime<Utc>,
}

impl Unit {
	pub fn new(property_id: PropertyId, label: impl Into<String>, bedrooms: u32, rent_cents: i64) -> Self {
		Self {
			id: UnitId::generate(),
			property_id,
			label: label.into(),
			bedrooms,
			rent_cents,
			created_at: Utc::now(),
		}
	}
}

/// A tenant's occupancy of a unit. `ends_on` is `None` for a rolling lease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Lease {
	#[schema(value_type = String, format = Uuid)]
	pub id: LeaseId,
	#[schema(value_type = String, format = Uuid)]
	pub unit_id: UnitId,
	#[schema(value_type = String, format = Uuid)]
	pub tenant_id: UserId,
	pub rent_cents: i64,
	pub starts_on: NaiveDate,
	pub ends_on: Option<NaiveDate>,
	pub created_at: DateTime<Utc>,
}

impl Lease {
	pub fn new(
		unit_id: UnitId,
		tenant_id: UserId,
		rent_cents: i64,
		starts_on: NaiveDate,
		ends_on: Option<NaiveDate>,
	) -> Self {
		Self {
			id: LeaseId::generate(),
			unit_id,
			tenant_id,
			rent_cents,
			starts_on,
			ends_on,
			created_at: Utc::now(),
		}
	}

	/// A lease may not end before it starts.
	pub fn has_valid_term(&self) -> bool {
		self.ends_on.map_or(true, |end| end >= self.starts_on)
	}
}

/// Lifecycle of a maintenance request. Moves strictly forward:
/// pending, approved, assigned, completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
	Pending,
	Approved,
	Assigned,
	Completed,
}

impl MaintenanceStatus {
	pub const fn as_str(&self) -> &'static str {
		match self {
			MaintenanceStatus::Pending => "pending",
			MaintenanceStatus::Approved => "approved",
			MaintenanceStatus::Assigned => "assigned",
			MaintenanceStatus::Completed => "completed",
		}
	}

	/// The status a request must be in before moving to `self`.
	pub const fn predecessor(&self) -> Option<MaintenanceStatus> {
		match self {
			MaintenanceStatus::Pending => None,
			MaintenanceStatus::Approved => Some(MaintenanceStatus::Pending),
			MaintenanceStatus::Assigned => Some(MaintenanceStatus::Approved),
			MaintenanceStatus::Completed => Some(MaintenanceStatus::Assigned),
		}
	}
}

impl fmt::Display for MaintenanceStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for MaintenanceStatus {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"pending" => Ok(MaintenanceStatus::Pending),
			"approved" => Ok(MaintenanceStatus::Approved),
			"assigned" => Ok(MaintenanceStatus::Assigned),
			"completed" => Ok(MaintenanceStatus::Completed),
			other => Err(format!("unknown maintenance status '{other}'")),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceRequest {
	#[schema(value_type = String, format = Uuid)]
	pub id: MaintenanceRequestId,
	#[schema(value_type = String, format = Uuid)]
	pub property_id: PropertyId,
	#[schema(value_type = Option<String>, format = Uuid)]
	pub unit_id: Option<UnitId>,
	#[schema(value_type = String, format = Uuid)]
	pub submitted_by: UserId,
	pub title: String,
	pub description: String,
	pub status: MaintenanceStatus,
	#[schema(value_type = Option<String>, format = Uuid)]
	pub assigned_workman_id: Option<UserId>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl MaintenanceRequest {
	pub fn new(
		property_id: PropertyId,
		unit_id: Option<UnitId>,
		submitted_by: UserId,
		title: impl Into<String>,
		description: impl Into<String>,
	) -> Self {
		let now = Utc::now();
		Self {
			id: MaintenanceRequestId::generate(),
			property_id,
			unit_id,
			submitted_by,
			title: title.into(),
			description: description.into(),
			status: MaintenanceStatus::Pending,
			assigned_workman_id: None,
			created_at: now,
			updated_at: now,
		}
	}
}

/// Which maintenance requests a list query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope {
	All,
	SubmittedBy(UserId),
	/// Requests raised against properties owned by this landlord.
	Landlord(UserId),
	AssignedTo(UserId),
}
