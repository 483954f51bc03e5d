// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lease repository.

use homely_server_auth::{LeaseId, UnitId};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use crate::error::DbError;
use crate::rows;
use crate::types::Lease;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct LeaseRepository {
	pool: SqlitePool,
}

impl LeaseRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// # Errors
	/// `DbError::Conflict` if the lease ends before it starts.
	#[tracing::instrument(skip(self, lease), fields(lease_id = %lease.id, unit_id = %lease.unit_id))]
	pub async fn create_lease(&self, lease: &Lease) -> Result<(), DbError> {
		if !lease.has_valid_term() {
			return Err(DbError::Conflict(
				"lease cannot end before it starts".to_string(),
			));
		}

		sqlx::query(
			r#"
			INSERT INTO leases (id, unit_id, tenant_id, rent_cents, starts_on, ends_on, created_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(lease.id.to_string())
		.bind(lease.unit_id.to_string())
		.bind(lease.tenant_id.to_string())
		.bind(lease.rent_cents)
		.bind(lease.starts_on.format(DATE_FORMAT).to_string())
		.bind(lease.ends_on.map(|d| d.format(DATE_FORMAT).to_string()))
		.bind(lease.created_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!("lease created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(lease_id = %id))]
	pub async fn get_lease(&self, id: &LeaseId) -> Result<Option<Lease>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, unit_id, tenant_id, rent_cents, starts_on, ends_on, created_at
			FROM leases
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(row_to_lease).transpose()
	}

	/// Leases on a unit, most recent term first.
	#[tracing::instrument(skip(self), fields(unit_id = %unit_id))]
	pub async fn list_leases(&self, unit_id: &UnitId) -> Result<Vec<Lease>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, unit_id, tenant_id, rent_cents, starts_on, ends_on, created_at
			FROM leases
			WHERE unit_id = ?
			ORDER BY starts_on DESC
			"#,
		)
		.bind(unit_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_lease).collect()
	}
}

fn row_to_lease(row: &SqliteRow) -> Result<Lease, DbError> {
	Ok(Lease {
		id: rows::id(row, "id")?,
		unit_id: rows::id(row, "unit_id")?,
		tenant_id: rows::id(row, "tenant_id")?,
		rent_cents: row.try_get("rent_cents")?,
		starts_on: rows::date(row, "starts_on")?,
		ends_on: rows::opt_date(row, "ends_on")?,
		created_at: rows::timestamp(row, "created_at")?,
	})
}
