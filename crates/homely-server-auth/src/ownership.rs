// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ownership lookup seam between the guard and the persistence layer.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::guard::{ResourceAttrs, ResourceKind};

#[derive(Debug, Error)]
pub enum OwnershipError {
	#[error("ownership lookup failed: {0}")]
	Lookup(String),
}

/// Answers "who owns resource X" for the ownership half of the guard.
///
/// Owners by kind:
/// - property: its landlord
/// - unit: the landlord of its property
/// - maintenance request: the landlord of the property it was raised against
/// - work order: the assigned workman, or nobody while unassigned
#[async_trait]
pub trait OwnershipResolver: Send + Sync {
	/// `Ok(None)` means the resource does not exist.
	async fn resolve(
		&self,
		kind: ResourceKind,
		id: Uuid,
	) -> Result<Option<ResourceAttrs>, OwnershipError>;
}
