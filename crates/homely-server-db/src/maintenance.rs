// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Maintenance request repository.
//!
//! Status changes are compare-and-set on the current status, so two
//! concurrent approvals cannot both succeed.

use chrono::Utc;
use homely_server_auth::{MaintenanceRequestId, UserId};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use crate::error::DbError;
use crate::rows;
use crate::types::{MaintenanceRequest, MaintenanceStatus, RequestScope};

const SELECT_COLUMNS: &str = r#"
	SELECT m.id, m.property_id, m.unit_id, m.submitted_by, m.title, m.description,
		m.status, m.assigned_workman_id, m.created_at, m.updated_at
	FROM maintenance_requests m
"#;

#[derive(Clone)]
pub struct MaintenanceRepository {
	pool: SqlitePool,
}

impl MaintenanceRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, request), fields(request_id = %request.id, property_id = %request.property_id))]
	pub async fn create_request(&self, request: &MaintenanceRequest) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO maintenance_requests
				(id, property_id, unit_id, submitted_by, title, description, status,
				 assigned_workman_id, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(request.id.to_string())
		.bind(request.property_id.to_string())
		.bind(request.unit_id.map(|id| id.to_string()))
		.bind(request.submitted_by.to_string())
		.bind(&request.title)
		.bind(&request.description)
		.bind(request.status.as_str())
		.bind(request.assigned_workman_id.map(|id| id.to_string()))
		.bind(request.created_at.to_rfc3339())
		.bind(request.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!("maintenance request created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(request_id = %id))]
	pub async fn get_request(
		&self,
		id: &MaintenanceRequestId,
	) -> Result<Option<MaintenanceRequest>, DbError> {
		let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE m.id = ?"))
			.bind(id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		row.as_ref().map(row_to_request).transpose()
	}

	/// List requests visible under `scope`, newest first.
	#[tracing::instrument(skip(self))]
	pub async fn list_requests(&self, scope: RequestScope) -> Result<Vec<MaintenanceRequest>, DbError> {
		let (filter, user) = match scope {
			RequestScope::All => ("", None),
			RequestScope::SubmittedBy(user) => ("WHERE m.submitted_by = ?", Some(user)),
			RequestScope::AssignedTo(user) => ("WHERE m.assigned_workman_id = ?", Some(user)),
			RequestScope::Landlord(user) => (
				"JOIN properties p ON p.id = m.property_id WHERE p.landlord_id = ?",
				Some(user),
			),
		};

		let sql = format!("{SELECT_COLUMNS} {filter} ORDER BY m.created_at DESC");
		let mut query = sqlx::query(&sql);
		if let Some(user) = user {
			query = query.bind(user.to_string());
		}
		let rows = query.fetch_all(&self.pool).await?;

		rows.iter().map(row_to_request).collect()
	}

	/// pending -> approved.
	pub async fn approve(&self, id: &MaintenanceRequestId) -> Result<MaintenanceRequest, DbError> {
		self.transition(id, MaintenanceStatus::Approved, None).await
	}

	/// approved -> assigned, recording the workman.
	pub async fn assign(
		&self,
		id: &MaintenanceRequestId,
		workman: &UserId,
	) -> Result<MaintenanceRequest, DbError> {
		self
			.transition(id, MaintenanceStatus::Assigned, Some(workman))
			.await
	}

	/// assigned -> completed.
	pub async fn complete(&self, id: &MaintenanceRequestId) -> Result<MaintenanceRequest, DbError> {
		self.transition(id, MaintenanceStatus::Completed, None).await
	}

	/// # Errors
	/// `DbError::NotFound` if the request does not exist; `DbError::Conflict`
	/// if it is not currently in `next`'s predecessor status.
	#[tracing::instrument(skip(self, workman), fields(request_id = %id, to = %next))]
	async fn transition(
		&self,
		id: &MaintenanceRequestId,
		next: MaintenanceStatus,
		workman: Option<&UserId>,
	) -> Result<MaintenanceRequest, DbError> {
		let expected = next.predecessor().ok_or_else(|| {
			DbError::Internal(format!("{next} is not reachable by transition"))
		})?;

		let result = sqlx::query(
			r#"
			UPDATE maintenance_requests
			SET status = ?,
				assigned_workman_id = COALESCE(?, assigned_workman_id),
				updated_at = ?
			WHERE id = ? AND status = ?
			"#,
		)
		.bind(next.as_str())
		.bind(workman.map(|w| w.to_string()))
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.bind(expected.as_str())
		.execute(&self.pool)
		.await?;

		let current = self
			.get_request(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("maintenance request {id}")))?;

		if result.rows_affected() == 0 {
			tracing::debug!(current = %current.status, "status transition rejected");
			return Err(DbError::Conflict(format!(
				"cannot move maintenance request from {} to {next}",
				current.status
			)));
		}

		tracing::debug!("status transition applied");
		Ok(current)
	}
}

fn row_to_request(row: &SqliteRow) -> Result<MaintenanceRequest, DbError> {
	let status: String = row.try_get("status")?;
	Ok(MaintenanceRequest {
		id: rows::id(row, "id")?,
		property_id: rows::id(row, "property_id")?,
		unit_id: rows::opt_id(row, "unit_id")?,
		submitted_by: rows::id(row, "submitted_by")?,
		title: row.try_get("title")?,
		description: row.try_get("description")?,
		status: status.parse().map_err(DbError::Internal)?,
		assigned_workman_id: rows::opt_id(row, "assigned_workman_id")?,
		created_at: rows::timestamp(row, "created_at")?,
		updated_at: rows::timestamp(row, "updated_at")?,
	})
}
