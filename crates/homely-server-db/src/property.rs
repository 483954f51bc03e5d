// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Property and unit repository.

use chrono::Utc;
use homely_server_auth::{PropertyId, UnitId, UserId};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use crate::error::DbError;
use crate::rows;
use crate::types::{Property, Unit};

/// Repository for properties and the units within them.
#[derive(Clone)]
pub struct PropertyRepository {
	pool: SqlitePool,
}

impl PropertyRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	// =========================================================================
	// Properties
	// =========================================================================

	#[tracing::instrument(skip(self, property), fields(property_id = %property.id, landlord_id = %property.landlord_id))]
	pub async fn create_property(&self, property: &Property) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO properties (id, landlord_id, name, address, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(property.id.to_string())
		.bind(property.landlord_id.to_string())
		.bind(&property.name)
		.bind(&property.address)
		.bind(property.created_at.to_rfc3339())
		.bind(property.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!("property created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(property_id = %id))]
	pub async fn get_property(&self, id: &PropertyId) -> Result<Option<Property>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, landlord_id, name, address, created_at, updated_at
			FROM properties
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(row_to_property).transpose()
	}

	/// List properties, newest first. `None` lists every landlord's.
	#[tracing::instrument(skip(self))]
	pub async fn list_properties(&self, landlord: Option<&UserId>) -> Result<Vec<Property>, DbError> {
		let rows = match landlord {
			Some(landlord) => {
				sqlx::query(
					r#"
					SELECT id, landlord_id, name, address, created_at, updated_at
					FROM properties
					WHERE landlord_id = ?
					ORDER BY created_at DESC
					"#,
				)
				.bind(landlord.to_string())
				.fetch_all(&self.pool)
				.await?
			}
			None => {
				sqlx::query(
					r#"
					SELECT id, landlord_id, name, address, created_at, updated_at
					FROM properties
					ORDER BY created_at DESC
					"#,
				)
				.fetch_all(&self.pool)
				.await?
			}
		};

		rows.iter().map(row_to_property).collect()
	}

	/// Update name and address. Returns the stored record, or `None` if the
	/// property does not exist.
	#[tracing::instrument(skip(self, name, address), fields(property_id = %id))]
	pub async fn update_property(
		&self,
		id: &PropertyId,
		name: &str,
		address: &str,
	) -> Result<Option<Property>, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE properties
			SET name = ?, address = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(name)
		.bind(address)
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Ok(None);
		}
		self.get_property(id).await
	}

	/// Delete a property together with its units and maintenance requests.
	#[tracing::instrument(skip(self), fields(property_id = %id))]
	pub async fn delete_property(&self, id: &PropertyId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM properties WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!("property deleted");
		}
		Ok(deleted)
	}

	// =========================================================================
	// Units
	// =========================================================================

	/// # Errors
	/// `DbError::Conflict` if the property already has a unit with this label.
	#[tracing::instrument(skip(self, unit), fields(unit_id = %unit.id, property_id = %unit.property_id))]
	pub async fn create_unit(&self, unit: &Unit) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			INSERT INTO units (id, property_id, label, bedrooms, rent_cents, created_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(unit.id.to_string())
		.bind(unit.property_id.to_string())
		.bind(&unit.label)
		.bind(i64::from(unit.bedrooms))
		.bind(unit.rent_cents)
		.bind(unit.created_at.to_rfc3339())
		.execute(&self.pool)
		.await;

		match result {
			Ok(_) => {
				tracing::debug!("unit created");
				Ok(())
			}
			Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(DbError::Conflict(
				format!("unit '{}' already exists on this property", unit.label),
			)),
			Err(e) => Err(e.into()),
		}
	}

	#[tracing::instrument(skip(self), fields(unit_id = %id))]
	pub async fn get_unit(&self, id: &UnitId) -> Result<Option<Unit>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, property_id, label, bedrooms, rent_cents, created_at
			FROM units
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(row_to_unit).transpose()
	}

	#[tracing::instrument(skip(self), fields(property_id = %property_id))]
	pub async fn list_units(&self, property_id: &PropertyId) -> Result<Vec<Unit>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, property_id, label, bedrooms, rent_cents, created_at
			FROM units
			WHERE property_id = ?
			ORDER BY label
			"#,
		)
		.bind(property_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_unit).collect()
	}
}

fn row_to_property(row: &SqliteRow) -> Result<Property, DbError> {
	Ok(Property {
		id: rows::id(row, "id")?,
		landlord_id: rows::id(row, "landlord_id")?,
		name: row.try_get("name")?,
		address: row.try_get("address")?,
		created_at: rows::timestamp(row, "created_at")?,
		updated_at: rows::timestamp(row, "updated_at")?,
	})
}

fn row_to_unit(row: &SqliteRow) -> Result<Unit, DbError> {
	let bedrooms: i64 = row.try_get("bedrooms")?;
	Ok(Unit {
		id: rows::id(row, "id")?,
		property_id: rows::id(row, "property_id")?,
		label: row.try_get("label")?,
		bedrooms: u32::try_from(bedrooms)
			.map_err(|_| DbError::Internal(format!("Invalid bedrooms: {bedrooms}")))?,
		rent_cents: row.try_get("rent_cents")?,
		created_at: rows::timestamp(row, "created_at")?,
	})
}
