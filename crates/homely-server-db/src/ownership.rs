// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQL-backed ownership lookups for the authorization guard.

use async_trait::async_trait;
use homely_server_auth::{
	OwnershipError, OwnershipResolver, ResourceAttrs, ResourceKind, UserId,
};
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct SqlOwnershipResolver {
	pool: SqlitePool,
}

impl SqlOwnershipResolver {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

fn owner_query(kind: ResourceKind) -> &'static str {
	match kind {
		ResourceKind::Property => "SELECT landlord_id AS owner FROM properties WHERE id = ?",
		ResourceKind::Unit => {
			r#"
			SELECT p.landlord_id AS owner
			FROM units u
			JOIN properties p ON p.id = u.property_id
			WHERE u.id = ?
			"#
		}
		ResourceKind::Lease => {
			r#"
			SELECT p.landlord_id AS owner
			FROM leases l
			JOIN units u ON u.id = l.unit_id
			JOIN properties p ON p.id = u.property_id
			WHERE l.id = ?
			"#
		}
		ResourceKind::MaintenanceRequest => {
			r#"
			SELECT p.landlord_id AS owner
			FROM maintenance_requests m
			JOIN properties p ON p.id = m.property_id
			WHERE m.id = ?
			"#
		}
		ResourceKind::WorkOrder => {
			"SELECT assigned_workman_id AS owner FROM maintenance_requests WHERE id = ?"
		}
	}
}

#[async_trait]
impl OwnershipResolver for SqlOwnershipResolver {
	#[tracing::instrument(skip(self), fields(kind = %kind, resource_id = %id))]
	async fn resolve(
		&self,
		kind: ResourceKind,
		id: Uuid,
	) -> Result<Option<ResourceAttrs>, OwnershipError> {
		let row: Option<(Option<String>,)> = sqlx::query_as(owner_query(kind))
			.bind(id.to_string())
			.fetch_optional(&self.pool)
			.await
			.map_err(|e| OwnershipError::Lookup(e.to_string()))?;

		let Some((owner,)) = row else {
			return Ok(None);
		};

		let owner = owner
			.map(|raw| {
				Uuid::parse_str(&raw)
					.map(UserId::new)
					.map_err(|e| OwnershipError::Lookup(format!("invalid owner id: {e}")))
			})
			.transpose()?;

		Ok(Some(ResourceAttrs::new(kind, owner)))
	}
}
