// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Column decoding shared by the repositories. IDs are stored as UUID
//! strings, timestamps as RFC 3339 and dates as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::error::DbError;

pub(crate) fn id<T: From<Uuid>>(row: &SqliteRow, column: &str) -> Result<T, DbError> {
	let raw: String = row.try_get(column)?;
	Uuid::parse_str(&raw)
		.map(T::from)
		.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}

pub(crate) fn opt_id<T: From<Uuid>>(row: &SqliteRow, column: &str) -> Result<Option<T>, DbError> {
	let raw: Option<String> = row.try_get(column)?;
	raw
		.map(|raw| {
			Uuid::parse_str(&raw)
				.map(T::from)
				.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
		})
		.transpose()
}

pub(crate) fn timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, DbError> {
	let raw: String = row.try_get(column)?;
	DateTime::parse_from_rfc3339(&raw)
		.map(|ts| ts.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}

pub(crate) fn opt_date(row: &SqliteRow, column: &str) -> Result<Option<NaiveDate>, DbError> {
	let raw: Option<String> = row.try_get(column)?;
	raw
		.map(|raw| {
			raw
				.parse::<NaiveDate>()
				.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
		})
		.transpose()
}

pub(crate) fn date(row: &SqliteRow, column: &str) -> Result<NaiveDate, DbError> {
	opt_date(row, column)?.ok_or_else(|| DbError::Internal(format!("Missing {column}")))
}
